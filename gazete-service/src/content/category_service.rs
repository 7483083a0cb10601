use super::{decode_item, decode_items};
use async_trait::async_trait;
use gazete_api::cms::{CmsClient, Envelope, QueryParams};
use gazete_domain::content::{constant, Category};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Kategori服务trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// 活跃分类，按sira升序（导航栏用）
    async fn list_active(&self) -> Vec<Category>;

    /// 按slug取活跃分类
    async fn get_by_slug(&self, slug: &str) -> Option<Category>;
}

/// 默认Kategori服务实现
pub struct DefaultCategoryService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultCategoryService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    async fn fetch_flat(&self, params: &[(String, String)]) -> Option<Value> {
        match self
            .client
            .get_json(constant::CATEGORY_COLLECTION, params, None)
            .await
        {
            Ok(body) => Envelope::parse(body).map(|envelope| envelope.into_flat().0),
            Err(e) => {
                error!(error = %e, "category fetch failed");
                None
            }
        }
    }
}

#[async_trait]
impl<C: CmsClient> CategoryService for DefaultCategoryService<C> {
    async fn list_active(&self) -> Vec<Category> {
        let params = QueryParams::new()
            .filter("aktif", "$eq", "true")
            .sort("sira:asc")
            .raw("populate", "*")
            .into_pairs();
        match self.fetch_flat(&params).await {
            Some(flat) => decode_items(flat, constant::CATEGORY_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Option<Category> {
        let params = QueryParams::new()
            .filter("slug", "$eq", slug)
            .filter("aktif", "$eq", "true")
            .into_pairs();
        let flat = self.fetch_flat(&params).await?;
        let first = match flat {
            Value::Array(mut items) if !items.is_empty() => items.remove(0),
            _ => return None,
        };
        decode_item(first, constant::CATEGORY_COLLECTION)
    }
}
