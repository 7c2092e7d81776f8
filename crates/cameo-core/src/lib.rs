pub mod archive;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fraud;
pub mod persona;
pub mod session;
pub mod state;

// Re-export common error type
pub use error::{CameoError, Result};
