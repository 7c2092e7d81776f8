//! One toolset per persona family.

pub mod fraud;
pub mod improv;
pub mod orders;
pub mod sales;
pub mod tutor;
pub mod wellness;

pub use fraud::FraudToolset;
pub use improv::ImprovToolset;
pub use orders::OrdersToolset;
pub use sales::SalesToolset;
pub use tutor::{TutorRole, TutorToolset};
pub use wellness::WellnessToolset;
