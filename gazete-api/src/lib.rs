pub mod cms;

pub use cms::{
    flatten_value, ArticleQuery, CmsClient, CmsError, CmsNode, CmsRecord, Envelope, Meta,
    Pagination, QueryParams,
};
