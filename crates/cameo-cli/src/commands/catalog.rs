use anyhow::{bail, Result};

use cameo_core::catalog::{FaqHit, ProductCatalog};

use super::utils::service;

const DOMAINS: &str = "faq, groceries, storefront, cases, topics";

pub async fn show(domain: &str) -> Result<()> {
    let service = service()?;
    let catalogs = service.catalogs();
    let json = match domain {
        "faq" => serde_json::to_string_pretty(catalogs.faq.as_ref())?,
        "groceries" => serde_json::to_string_pretty(catalogs.groceries.as_ref())?,
        "storefront" => serde_json::to_string_pretty(catalogs.storefront.as_ref())?,
        "topics" => serde_json::to_string_pretty(catalogs.topics.as_ref())?,
        "cases" => serde_json::to_string_pretty(&service.cases().list_all().await?)?,
        other => bail!("unknown catalog '{other}'; expected one of: {DOMAINS}"),
    };
    println!("{json}");
    Ok(())
}

pub async fn find(domain: &str, query: &str) -> Result<()> {
    let service = service()?;
    let catalogs = service.catalogs();
    match domain {
        "faq" => match catalogs.faq.find_by_keyword(query) {
            FaqHit::Entry(entry) => {
                println!("Q: {}", entry.question);
                println!("A: {}", entry.answer);
            }
            FaqHit::Overview {
                description,
                pricing,
            } => {
                println!("No entry matched; the overview answers instead:");
                println!("{description} {pricing}");
            }
        },
        "groceries" => find_product(&catalogs.groceries, query),
        "storefront" => find_product(&catalogs.storefront, query),
        "topics" => {
            let hit = catalogs
                .topics
                .find_by_id(query)
                .or_else(|| catalogs.topics.find_by_keyword(query));
            match hit {
                Some(topic) => println!("{} ({}): {}", topic.title, topic.id, topic.summary),
                None => println!("No topic matched '{query}'."),
            }
        }
        "cases" => match service.cases().find_by_name(query).await? {
            Some(case) => println!(
                "{}: {} [{:?}]",
                case.user_name,
                case.transaction_line(),
                case.status
            ),
            None => println!("No case under '{query}'."),
        },
        other => bail!("unknown catalog '{other}'; expected one of: {DOMAINS}"),
    }
    Ok(())
}

fn find_product(catalog: &ProductCatalog, query: &str) {
    let hit = catalog
        .find_by_id(query)
        .or_else(|| catalog.find_by_keyword(query));
    match hit {
        Some(product) => println!(
            "{} ({}) {}",
            product.name,
            product.id,
            product.display_price()
        ),
        None => println!("No item matched '{query}'."),
    }
}
