pub mod api;
pub mod app;
pub mod core;
pub mod docs;
pub mod error;
pub mod fetch;
pub mod markdown;
pub mod mindmap;
pub mod report;
pub mod utils;

// Re-exports
pub use api::HttpBackend;
pub use core::config::ViewerConfig;
pub use core::types::Backend;
pub use error::FetchError;
pub use markdown::MarkdownRenderer;
