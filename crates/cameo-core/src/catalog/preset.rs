//! Built-in fallback data for every catalog.
//!
//! When a catalog file is missing or unreadable the session still has to
//! open, so each persona ships with a small usable dataset. File contents,
//! when present and valid, replace these wholesale.

use super::model::{
    CaseStatus, FaqEntry, FaqSheet, FraudCase, Product, ProductCatalog, TopicList, TutorTopic,
};

/// Default company sheet for the sales persona.
pub fn default_faq_sheet() -> FaqSheet {
    FaqSheet {
        company: "Brightpath Labs".to_string(),
        tagline: "Customer insight without the spreadsheet grind".to_string(),
        description: "Brightpath Labs turns raw support tickets and survey answers into \
                      weekly insight digests your whole team can read."
            .to_string(),
        pricing: "Starter is free for one workspace. Growth is $49 per workspace per month. \
                  Enterprise pricing is custom."
            .to_string(),
        faq: vec![
            FaqEntry {
                question: "What data sources do you connect to?".to_string(),
                answer: "Zendesk, Intercom, Typeform and plain CSV uploads.".to_string(),
            },
            FaqEntry {
                question: "Is there a free trial?".to_string(),
                answer: "Growth comes with a 14 day trial, no card required.".to_string(),
            },
            FaqEntry {
                question: "Do you offer single sign-on?".to_string(),
                answer: "SSO via SAML is included on Enterprise.".to_string(),
            },
        ],
    }
}

/// Default shelf stock for the grocery clerk.
pub fn default_grocery_catalog() -> ProductCatalog {
    ProductCatalog {
        items: vec![
            product("milk-2pct", "Milk 2%", 3.49, Some("half gallon"), Some("dairy")),
            product("eggs-dozen", "Eggs", 4.10, Some("dozen"), Some("dairy")),
            product("oat-loaf", "Oat Loaf", 4.25, Some("loaf"), Some("bakery")),
            product("bananas", "Bananas", 0.59, Some("per pound"), Some("produce")),
            product("roma-tomatoes", "Roma Tomatoes", 1.89, Some("per pound"), Some("produce")),
            product("ground-coffee", "Ground Coffee", 8.99, Some("12 oz bag"), Some("pantry")),
        ],
    }
}

/// Default inventory for the storefront assistant.
pub fn default_storefront_catalog() -> ProductCatalog {
    ProductCatalog {
        items: vec![
            product("desk-lamp", "Arc Desk Lamp", 42.00, None, Some("lighting")),
            product("felt-organizer", "Felt Desk Organizer", 18.50, None, Some("desk")),
            product("cork-board", "Cork Pin Board", 24.00, None, Some("wall")),
            product("brass-pen", "Brass Ballpoint Pen", 15.00, None, Some("writing")),
            product("linen-notebook", "Linen Notebook A5", 12.00, None, Some("writing")),
        ],
    }
}

/// Default review queue for the case verifier.
pub fn default_fraud_cases() -> Vec<FraudCase> {
    vec![
        FraudCase {
            user_name: "Riley Chen".to_string(),
            security_question: "What street did you grow up on?".to_string(),
            security_identifier: "Maple".to_string(),
            status: CaseStatus::Pending,
            amount: "$742.10".to_string(),
            merchant: "Skyline Electronics".to_string(),
            card_last4: "4417".to_string(),
            note: None,
            updated_at: None,
        },
        FraudCase {
            user_name: "Amara Okafor".to_string(),
            security_question: "What was the name of your first pet?".to_string(),
            security_identifier: "Biscuit".to_string(),
            status: CaseStatus::Pending,
            amount: "$128.45".to_string(),
            merchant: "Northgate Fuel".to_string(),
            card_last4: "9082".to_string(),
            note: None,
            updated_at: None,
        },
    ]
}

/// Default topic list for the tutoring router.
pub fn default_topic_list() -> TopicList {
    TopicList {
        topics: vec![
            TutorTopic {
                id: "fractions".to_string(),
                title: "Fractions".to_string(),
                summary: "Adding, comparing and simplifying fractions.".to_string(),
                sample_question: "Which is larger, 3/4 or 2/3, and how do you know?".to_string(),
            },
            TutorTopic {
                id: "photosynthesis".to_string(),
                title: "Photosynthesis".to_string(),
                summary: "How plants turn light, water and carbon dioxide into food.".to_string(),
                sample_question: "Where in the plant cell does photosynthesis happen?".to_string(),
            },
            TutorTopic {
                id: "world-war-one".to_string(),
                title: "World War One".to_string(),
                summary: "Causes of the war and why it spread so quickly.".to_string(),
                sample_question: "What role did alliances play in starting the war?".to_string(),
            },
        ],
    }
}

fn product(
    id: &str,
    name: &str,
    price: f64,
    unit: Option<&str>,
    category: Option<&str>,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        unit: unit.map(str::to_string),
        category: category.map(str::to_string),
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogs_are_searchable() {
        assert!(default_grocery_catalog().find_by_keyword("milk").is_some());
        assert!(default_storefront_catalog().find_by_id("desk-lamp").is_some());
        assert!(default_topic_list().find_by_id("fractions").is_some());
    }

    #[test]
    fn test_default_cases_start_pending() {
        for case in default_fraud_cases() {
            assert_eq!(case.status, CaseStatus::Pending);
            assert!(case.note.is_none());
        }
    }

    #[test]
    fn test_default_faq_has_overview_fields() {
        let sheet = default_faq_sheet();
        assert!(!sheet.description.is_empty());
        assert!(!sheet.pricing.is_empty());
        assert!(!sheet.faq.is_empty());
    }
}
