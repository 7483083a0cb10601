use super::{decode_item, decode_items};
use async_trait::async_trait;
use gazete_api::cms::{CmsClient, Envelope, QueryParams};
use gazete_domain::content::{constant, Author};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Yazar服务trait
#[async_trait]
pub trait AuthorService: Send + Sync {
    /// 活跃作者列表
    async fn list_active(&self) -> Vec<Author>;

    /// 按slug取作者
    async fn get_by_slug(&self, slug: &str) -> Option<Author>;
}

/// 默认Yazar服务实现
pub struct DefaultAuthorService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultAuthorService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    async fn fetch_flat(&self, params: &[(String, String)]) -> Option<Value> {
        match self
            .client
            .get_json(constant::AUTHOR_COLLECTION, params, None)
            .await
        {
            Ok(body) => Envelope::parse(body).map(|envelope| envelope.into_flat().0),
            Err(e) => {
                error!(error = %e, "author fetch failed");
                None
            }
        }
    }
}

#[async_trait]
impl<C: CmsClient> AuthorService for DefaultAuthorService<C> {
    async fn list_active(&self) -> Vec<Author> {
        let params = QueryParams::new()
            .filter("aktif", "$eq", "true")
            .raw("populate", "*")
            .into_pairs();
        match self.fetch_flat(&params).await {
            Some(flat) => decode_items(flat, constant::AUTHOR_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Option<Author> {
        let params = QueryParams::new()
            .filter("slug", "$eq", slug)
            .raw("populate", "*")
            .into_pairs();
        let flat = self.fetch_flat(&params).await?;
        let first = match flat {
            Value::Array(mut items) if !items.is_empty() => items.remove(0),
            _ => return None,
        };
        decode_item(first, constant::AUTHOR_COLLECTION)
    }
}
