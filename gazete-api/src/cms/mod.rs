pub mod client;
pub mod envelope;
pub mod query;

pub use client::{CmsClient, CmsError};
pub use envelope::{flatten_value, CmsNode, CmsRecord, Envelope, Meta, Pagination};
pub use query::{ArticleQuery, QueryParams};
