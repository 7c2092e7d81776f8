//! Reference data the personas consult mid-conversation.

pub mod model;
pub mod preset;
pub mod repository;
pub mod search;

pub use model::{
    CasePatch, CaseStatus, FaqEntry, FaqHit, FaqSheet, FraudCase, Product, ProductCatalog,
    TopicList, TutorTopic,
};
pub use repository::CaseRepository;
