use async_trait::async_trait;
use gazete_api::cms::{CmsClient, Envelope, QueryParams};
use gazete_domain::content::constant;
use gazete_domain::settings::{SiteSettings, ThemeSettings};
use gazete_infra::cache::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// 站点/主题设置服务
///
/// 两个CMS单例每页都要用，读路径走TTL缓存；写路径（后台保存）
/// 直写CMS并使缓存失效。
#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn site(&self) -> Option<SiteSettings>;
    async fn theme(&self) -> Option<ThemeSettings>;

    /// 保存站点设置（后台）
    async fn update_site(
        &self,
        patch: Value,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// 保存主题设置（后台）
    async fn update_theme(
        &self,
        patch: Value,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// 默认设置服务实现
pub struct DefaultSettingsService<C: CmsClient> {
    client: Arc<C>,
    cache: Arc<dyn Cache>,
}

impl<C: CmsClient> DefaultSettingsService<C> {
    pub fn new(client: Arc<C>, cache: Arc<dyn Cache>) -> Self {
        Self { client, cache }
    }

    async fn fetch_singleton<T>(&self, path: &'static str) -> Option<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.cache.get(path).await {
            if let Ok(value) = serde_json::from_str(&cached) {
                return Some(value);
            }
        }

        let params = QueryParams::new().raw("populate", "*").into_pairs();
        let body = match self.client.get_json(path, &params, None).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, resource = path, "settings fetch failed");
                return None;
            }
        };
        let flat = Envelope::parse(body)?.into_flat().0;
        let value: T = match serde_json::from_value(flat) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, resource = path, "settings failed to decode");
                return None;
            }
        };

        if let Ok(serialized) = serde_json::to_string(&value) {
            self.cache.set(path, serialized).await;
        }
        Some(value)
    }
}

#[async_trait]
impl<C: CmsClient> SettingsService for DefaultSettingsService<C> {
    async fn site(&self) -> Option<SiteSettings> {
        self.fetch_singleton(constant::SITE_SETTINGS_SINGLETON).await
    }

    async fn theme(&self) -> Option<ThemeSettings> {
        self.fetch_singleton(constant::THEME_SETTINGS_SINGLETON).await
    }

    async fn update_site(
        &self,
        patch: Value,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({ "data": patch });
        self.client
            .put_json(constant::SITE_SETTINGS_SINGLETON, &body, Some(token))
            .await?;
        self.cache.invalidate(constant::SITE_SETTINGS_SINGLETON).await;
        Ok(())
    }

    async fn update_theme(
        &self,
        patch: Value,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({ "data": patch });
        self.client
            .put_json(constant::THEME_SETTINGS_SINGLETON, &body, Some(token))
            .await?;
        self.cache
            .invalidate(constant::THEME_SETTINGS_SINGLETON)
            .await;
        Ok(())
    }
}
