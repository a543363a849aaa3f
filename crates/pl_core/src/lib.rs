pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::CompletionModel;
pub use types::{Article, Summary, SUMMARY_FAILED, UNTITLED};
