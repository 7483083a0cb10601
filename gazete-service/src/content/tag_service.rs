use super::decode_item;
use async_trait::async_trait;
use gazete_api::cms::{CmsClient, Envelope, QueryParams};
use gazete_domain::content::{constant, Tag};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Etiket服务trait
#[async_trait]
pub trait TagService: Send + Sync {
    /// 按slug取标签（标签页标题用）
    async fn get_by_slug(&self, slug: &str) -> Option<Tag>;
}

/// 默认Etiket服务实现
pub struct DefaultTagService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultTagService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: CmsClient> TagService for DefaultTagService<C> {
    async fn get_by_slug(&self, slug: &str) -> Option<Tag> {
        let params = QueryParams::new().filter("slug", "$eq", slug).into_pairs();
        let body = match self
            .client
            .get_json(constant::TAG_COLLECTION, &params, None)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "tag fetch failed");
                return None;
            }
        };
        let flat = Envelope::parse(body)?.into_flat().0;
        let first = match flat {
            Value::Array(mut items) if !items.is_empty() => items.remove(0),
            _ => return None,
        };
        decode_item(first, constant::TAG_COLLECTION)
    }
}
