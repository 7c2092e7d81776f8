pub mod archive;
pub mod catalog;
pub mod personas;
pub mod run;
pub mod utils;
