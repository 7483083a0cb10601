use gazete_domain::theme::ThemeMode;
use gazete_service::content::{
    ArticleService, AuthorService, CategoryService, CommentService, TagService,
};
use gazete_service::feed::FeedContext;
use gazete_service::security::AuthService;
use gazete_service::settings::SettingsService;
use std::sync::Arc;
use tera::Tera;

/// 站点级元数据（来自配置，不依赖CMS可用）
#[derive(Debug, Clone)]
pub struct SiteMeta {
    /// 对外基地址，不带尾斜杠
    pub base_url: String,
    /// CMS基地址（媒体URL补全）
    pub cms_url: String,
    pub name: String,
    pub description: String,
    pub language: String,
    /// 配置层面的默认主题，CMS主题设置缺席时兜底
    pub default_theme: Option<ThemeMode>,
}

impl SiteMeta {
    pub fn feed_context(&self) -> FeedContext {
        FeedContext {
            site_url: self.base_url.clone(),
            cms_url: self.cms_url.clone(),
            site_name: self.name.clone(),
            site_description: self.description.clone(),
            language: self.language.clone(),
            generator: "gazete".to_string(),
        }
    }
}

/// 应用状态
/// 包含所有handler需要的服务实例
#[derive(Clone)]
pub struct AppState {
    pub article_service: Arc<dyn ArticleService>,
    pub category_service: Arc<dyn CategoryService>,
    pub author_service: Arc<dyn AuthorService>,
    pub tag_service: Arc<dyn TagService>,
    pub comment_service: Arc<dyn CommentService>,
    pub settings_service: Arc<dyn SettingsService>,
    pub auth_service: Arc<dyn AuthService>,
    pub templates: Arc<Tera>,
    pub site: SiteMeta,
}
