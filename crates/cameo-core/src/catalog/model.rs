//! Read-side reference data: FAQ sheets, product lists, fraud cases,
//! tutoring topics.
//!
//! All of these load from JSON files resolved at startup; missing or
//! malformed files fall back to built-in presets so a session can always
//! open.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::search::{best_match, keyword_tokens, score_text};

/// One question/answer pair on an FAQ sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Company overview plus FAQ entries, used by sales-style personas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqSheet {
    pub company: String,
    pub tagline: String,
    pub description: String,
    pub pricing: String,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
}

/// Result of an FAQ lookup.
///
/// Lookup is total: when no entry matches the query, the sheet answers
/// with its overview instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum FaqHit<'a> {
    /// A specific FAQ entry matched the query.
    Entry(&'a FaqEntry),
    /// Nothing matched; answer from the company overview.
    Overview {
        description: &'a str,
        pricing: &'a str,
    },
}

impl FaqSheet {
    /// Finds the FAQ entry best matching the query, or falls back to the
    /// company overview.
    ///
    /// Matching is deterministic: the same query against the same sheet
    /// always returns the same entry (first of the highest-scoring ones,
    /// in sheet order).
    pub fn find_by_keyword(&self, query: &str) -> FaqHit<'_> {
        let tokens = keyword_tokens(query);
        let hit = best_match(self.faq.iter(), |entry| {
            score_text(&tokens, &entry.question) + score_text(&tokens, &entry.answer)
        });
        match hit {
            Some(entry) => FaqHit::Entry(entry),
            None => FaqHit::Overview {
                description: &self.description,
                pricing: &self.pricing,
            },
        }
    }
}

/// One purchasable item in a product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Price rendered for a spoken confirmation, e.g. `$3.49`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// A product list, as used by the grocery and storefront personas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(alias = "products")]
    pub items: Vec<Product>,
}

impl ProductCatalog {
    /// Exact id lookup, ignoring case.
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.items
            .iter()
            .find(|item| item.id.eq_ignore_ascii_case(id))
    }

    /// Best keyword match over name, category and description.
    pub fn find_by_keyword(&self, query: &str) -> Option<&Product> {
        let tokens = keyword_tokens(query);
        best_match(self.items.iter(), |item| {
            let mut score = score_text(&tokens, &item.name);
            if let Some(category) = &item.category {
                score += score_text(&tokens, category);
            }
            if let Some(description) = &item.description {
                score += score_text(&tokens, description);
            }
            score
        })
    }
}

/// Lifecycle of a flagged transaction case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    ConfirmedSafe,
    ConfirmedFraud,
    Closed,
}

/// One flagged transaction under review.
///
/// Stored camelCase to match the case files the review desk exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudCase {
    pub user_name: String,
    pub security_question: String,
    /// The answer the caller must produce to pass verification.
    pub security_identifier: String,
    pub status: CaseStatus,
    pub amount: String,
    pub merchant: String,
    pub card_last4: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl FraudCase {
    /// Case-insensitive, whitespace-tolerant name match.
    pub fn matches_name(&self, name: &str) -> bool {
        self.user_name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Checks a caller's answer against the stored identifier, ignoring
    /// case and surrounding whitespace.
    pub fn answer_matches(&self, answer: &str) -> bool {
        self.security_identifier
            .trim()
            .eq_ignore_ascii_case(answer.trim())
    }

    /// One-line description of the flagged transaction for readback.
    pub fn transaction_line(&self) -> String {
        format!(
            "{} at {} on card ending {}",
            self.amount, self.merchant, self.card_last4
        )
    }
}

/// A resolution to apply to a stored case.
#[derive(Debug, Clone, PartialEq)]
pub struct CasePatch {
    pub status: CaseStatus,
    pub note: Option<String>,
}

impl CasePatch {
    pub fn new(status: CaseStatus, note: Option<String>) -> Self {
        Self { status, note }
    }

    /// Applies the patch to a case, stamping the update time.
    pub fn apply_to(&self, case: &mut FraudCase) {
        case.status = self.status;
        if let Some(note) = &self.note {
            case.note = Some(note.clone());
        }
        case.updated_at = Some(Utc::now().to_rfc3339());
    }
}

/// One teachable topic the tutor personas can route to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorTopic {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sample_question: String,
}

/// The topic list offered by the tutoring router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicList {
    pub topics: Vec<TutorTopic>,
}

impl TopicList {
    /// Exact id lookup, ignoring case.
    pub fn find_by_id(&self, id: &str) -> Option<&TutorTopic> {
        self.topics
            .iter()
            .find(|topic| topic.id.eq_ignore_ascii_case(id))
    }

    /// Best keyword match over title and summary.
    pub fn find_by_keyword(&self, query: &str) -> Option<&TutorTopic> {
        let tokens = keyword_tokens(query);
        best_match(self.topics.iter(), |topic| {
            score_text(&tokens, &topic.title) + score_text(&tokens, &topic.summary)
        })
    }
}
