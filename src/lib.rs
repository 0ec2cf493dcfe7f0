pub mod config;
pub mod error;
pub mod journal;
pub mod models;
pub mod store;
#[cfg(test)]
pub mod test_helpers;

pub use error::{JournalError, Result};
