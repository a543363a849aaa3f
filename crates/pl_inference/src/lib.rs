pub mod classifier;
pub mod config;
pub mod models;
pub mod probe;
pub mod prompts;
pub mod summarizer;

pub use classifier::Classifier;
pub use config::Config;
pub use models::create_model;
pub use summarizer::Summarizer;
