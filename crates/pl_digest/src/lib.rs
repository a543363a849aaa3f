pub mod document;
pub mod pipeline;
pub mod source;

pub use document::{render, DEFAULT_OUTPUT, HEADER};
pub use pipeline::{DigestPipeline, DigestReport};
pub use source::load_articles;
