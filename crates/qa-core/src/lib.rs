pub mod config;
pub mod error;
pub mod inventory;
pub mod manifest;
pub mod paths;
pub mod phases;
pub mod probe;
pub mod report;

pub use error::{QaError, Result};
