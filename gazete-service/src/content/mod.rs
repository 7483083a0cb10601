pub mod amp;
pub mod article_service;
pub mod author_service;
pub mod category_service;
pub mod comment_service;
pub mod tag_service;

pub use amp::to_amp_html;
pub use article_service::{ArticleList, ArticleService, DefaultArticleService};
pub use author_service::{AuthorService, DefaultAuthorService};
pub use category_service::{CategoryService, DefaultCategoryService};
pub use comment_service::{
    build_comment_tree, CommentNode, CommentService, DefaultCommentService, NewComment,
    MAX_REPLY_DEPTH,
};
pub use tag_service::{DefaultTagService, TagService};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// 展平后的数组逐条解码，坏记录跳过并记警告，绝不让整页失败
pub(crate) fn decode_items<T: DeserializeOwned>(flat: Value, resource: &'static str) -> Vec<T> {
    match flat {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(resource, error = %e, "skipping undecodable record");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// 单记录解码（get-by-slug等路径取数组首元素后用）
pub(crate) fn decode_item<T: DeserializeOwned>(flat: Value, resource: &'static str) -> Option<T> {
    if flat.is_null() {
        return None;
    }
    match serde_json::from_value::<T>(flat) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(resource, error = %e, "record failed to decode");
            None
        }
    }
}
