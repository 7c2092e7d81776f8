//! Order-taking tools shared by the grocery clerk and the storefront
//! assistant. The two personas differ only in catalog and copy; the cart
//! mechanics are identical.

use std::sync::Arc;

use async_trait::async_trait;

use cameo_core::archive::ArchiveRepository;
use cameo_core::catalog::{Product, ProductCatalog};
use cameo_core::error::Result;
use cameo_core::state::FieldValue;

use crate::tool::{
    optional_u64, required_str, unknown_tool, ParamSpec, ToolCall, ToolContext, ToolReply,
    ToolSpec, Toolset,
};

const SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "find_item",
        description: "Look an item up by id or descriptive words.",
        params: &[ParamSpec::required("query", "Item id or what the caller asked for.")],
    },
    ToolSpec {
        name: "add_to_cart",
        description: "Add a confirmed item to the order.",
        params: &[
            ParamSpec::required("item", "Item id or name."),
            ParamSpec::optional("quantity", "How many; defaults to 1."),
        ],
    },
    ToolSpec {
        name: "view_cart",
        description: "Read the current order back.",
        params: &[],
    },
    ToolSpec {
        name: "update_details",
        description: "Record order details (customer_name or pickup_time).",
        params: &[
            ParamSpec::required("field", "customer_name or pickup_time."),
            ParamSpec::required("value", "The detail."),
        ],
    },
    ToolSpec {
        name: "place_order",
        description: "Place the order. Call once, after reading the cart back.",
        params: &[],
    },
];

pub struct OrdersToolset {
    catalog: Arc<ProductCatalog>,
    archive: Arc<dyn ArchiveRepository>,
    store_name: &'static str,
}

impl OrdersToolset {
    pub fn new(
        catalog: Arc<ProductCatalog>,
        archive: Arc<dyn ArchiveRepository>,
        store_name: &'static str,
    ) -> Self {
        Self {
            catalog,
            archive,
            store_name,
        }
    }

    fn lookup(&self, query: &str) -> Option<&Product> {
        self.catalog
            .find_by_id(query)
            .or_else(|| self.catalog.find_by_keyword(query))
    }
}

/// Cart lines are written as `2 x Milk 2% @ $3.49`; the total is read
/// back off the same format.
fn cart_line(quantity: u64, product: &Product) -> String {
    format!("{quantity} x {} @ ${:.2}", product.name, product.price)
}

fn parse_cart_line(line: &str) -> Option<(u64, f64)> {
    let (quantity, rest) = line.split_once(" x ")?;
    let quantity = quantity.trim().parse::<u64>().ok()?;
    let (_, price) = rest.rsplit_once(" @ $")?;
    let price = price.trim().parse::<f64>().ok()?;
    Some((quantity, price))
}

fn cart_total(lines: &[String]) -> f64 {
    lines
        .iter()
        .filter_map(|line| parse_cart_line(line))
        .map(|(quantity, price)| quantity as f64 * price)
        .sum()
}

#[async_trait]
impl Toolset for OrdersToolset {
    fn specs(&self) -> &'static [ToolSpec] {
        SPECS
    }

    async fn handle(&self, ctx: &mut ToolContext<'_>, call: &ToolCall) -> Result<ToolReply> {
        match call.name.as_str() {
            "find_item" => {
                let query = required_str(call, "query")?;
                match self.lookup(query) {
                    Some(product) => {
                        let unit = product
                            .unit
                            .as_deref()
                            .map(|unit| format!(" per {unit}"))
                            .unwrap_or_default();
                        Ok(ToolReply::say(format!(
                            "We have {} at {}{unit}.",
                            product.name,
                            product.display_price()
                        )))
                    }
                    None => Ok(ToolReply::say(format!(
                        "I don't see that at {} right now.",
                        self.store_name
                    ))),
                }
            }
            "add_to_cart" => {
                let item = required_str(call, "item")?;
                let quantity = optional_u64(call, "quantity")?.unwrap_or(1).max(1);
                let Some(product) = self.lookup(item) else {
                    return Ok(ToolReply::say(format!(
                        "I can't add that; I don't see it at {}.",
                        self.store_name
                    )));
                };
                let line = cart_line(quantity, product);
                ctx.session.state.set("cart", line.clone())?;
                Ok(ToolReply::say(format!("Added {line} to your order.")))
            }
            "view_cart" => {
                let lines = match ctx.session.state.get("cart") {
                    Some(FieldValue::Items(items)) if !items.is_empty() => items.clone(),
                    _ => {
                        return Ok(ToolReply::say("Your order is empty so far."));
                    }
                };
                let total = cart_total(&lines);
                Ok(ToolReply::say(format!(
                    "So far: {}. That comes to ${total:.2}.",
                    lines.join("; ")
                )))
            }
            "update_details" => {
                let field = required_str(call, "field")?;
                let value = required_str(call, "value")?;
                ctx.session.state.set(field, value)?;
                Ok(ToolReply::say(format!("Noted, {field} is {value}.")))
            }
            "place_order" => {
                let has_items = matches!(
                    ctx.session.state.get("cart"),
                    Some(FieldValue::Items(items)) if !items.is_empty()
                );
                if !has_items {
                    return Ok(ToolReply::say(
                        "There's nothing in the order yet, so I can't place it.",
                    ));
                }
                let total = match ctx.session.state.get("cart") {
                    Some(FieldValue::Items(items)) => cart_total(items),
                    _ => 0.0,
                };
                let customer = ctx
                    .session
                    .state
                    .get("customer_name")
                    .and_then(|value| value.as_text())
                    .unwrap_or("walk-in")
                    .to_string();
                let summary = format!("order for {customer}, total ${total:.2}");
                let id = self
                    .archive
                    .append(&summary, ctx.session.state.snapshot())
                    .await?;
                ctx.session.state.reset();
                Ok(ToolReply::say(format!(
                    "Order {id} is in. Your total is ${total:.2}."
                )))
            }
            _ => Err(unknown_tool("orders", call)),
        }
    }
}
