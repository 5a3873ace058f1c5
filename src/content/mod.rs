pub mod client;
pub mod document;
pub mod envelope;
pub mod models;
pub mod request;
pub mod source;

pub use client::PortfolioClient;
pub use document::{ContentDocument, PhotoIndex};
pub use models::*;
pub use request::{FetchOptions, Query, ResourceKind, ResourceRequest};
pub use source::{ContentSource, SourceKind};
