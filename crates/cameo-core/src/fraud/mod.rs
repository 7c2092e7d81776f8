//! Flagged-transaction verification.

pub mod flow;

pub use flow::{VerificationFlow, VerificationStage};
