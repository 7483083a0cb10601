use crate::config::Config;
use crate::error::{GazeteError, Result};
use axum::routing::{get, post};
use axum::Router;
use gazete_domain::theme::ThemeMode;
use gazete_infra::cache::{Cache, MokaCache};
use gazete_infra::cms::HttpCmsClient;
use gazete_service::content::{
    ArticleService, AuthorService, CategoryService, CommentService, DefaultArticleService,
    DefaultAuthorService, DefaultCategoryService, DefaultCommentService, DefaultTagService,
    TagService,
};
use gazete_service::security::{AuthService, DefaultAuthService};
use gazete_service::settings::{DefaultSettingsService, SettingsService};
use gazete_web::{AppState, SiteMeta};
use std::sync::Arc;
use std::time::Duration;
use tera::Tera;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

/// 初始化应用状态
pub async fn init_app_state(config: &Config) -> Result<AppState> {
    let client = Arc::new(
        HttpCmsClient::new(
            &config.cms.url,
            config.cms.api_token.clone(),
            Duration::from_secs(config.cms.timeout_secs),
        )
        .map_err(|e| GazeteError::Cms(e.to_string()))?,
    );

    let cache: Arc<dyn Cache> = Arc::new(MokaCache::new(
        config.cache.max_capacity,
        Duration::from_secs(config.cache.ttl_secs),
    ));

    let article_service: Arc<dyn ArticleService> =
        Arc::new(DefaultArticleService::new(client.clone()));
    let category_service: Arc<dyn CategoryService> =
        Arc::new(DefaultCategoryService::new(client.clone()));
    let author_service: Arc<dyn AuthorService> =
        Arc::new(DefaultAuthorService::new(client.clone()));
    let tag_service: Arc<dyn TagService> = Arc::new(DefaultTagService::new(client.clone()));
    let comment_service: Arc<dyn CommentService> =
        Arc::new(DefaultCommentService::new(client.clone()));
    let settings_service: Arc<dyn SettingsService> =
        Arc::new(DefaultSettingsService::new(client.clone(), cache));
    let auth_service: Arc<dyn AuthService> = Arc::new(DefaultAuthService::new(client));

    let templates = Tera::new(&config.server.templates_glob)
        .map_err(|e| GazeteError::Template(e.to_string()))?;

    let site = SiteMeta {
        base_url: config.site.url.trim_end_matches('/').to_string(),
        cms_url: config.cms.url.trim_end_matches('/').to_string(),
        name: config.site.name.clone(),
        description: config.site.description.clone(),
        language: config.site.language.clone(),
        default_theme: config
            .site
            .default_theme
            .as_deref()
            .and_then(ThemeMode::parse),
    };

    Ok(AppState {
        article_service,
        category_service,
        author_service,
        tag_service,
        comment_service,
        settings_service,
        auth_service,
        templates: Arc::new(templates),
        site,
    })
}

/// 创建应用路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 公开页面
        .route("/", get(gazete_web::home))
        .route("/haber/:slug", get(gazete_web::article_page))
        .route("/haber/:slug/amp", get(gazete_web::article_amp))
        .route("/kategori/:slug", get(gazete_web::category_page))
        .route("/yazar/:slug", get(gazete_web::author_page))
        .route("/etiket/:slug", get(gazete_web::tag_page))
        .route("/arama", get(gazete_web::search_page))
        // Feed端点
        .route("/rss/feed.xml", get(gazete_web::rss_feed))
        .route("/news-sitemap.xml", get(gazete_web::news_sitemap))
        .route("/sitemap.xml", get(gazete_web::sitemap))
        // 评论与主题
        .route("/yorumlar", post(gazete_web::submit_comment))
        .route("/yorumlar/:id/begen", post(gazete_web::like_comment))
        .route("/tema", post(gazete_web::set_theme))
        // 管理端
        .route(
            "/admin/giris",
            get(gazete_web::login_form).post(gazete_web::login),
        )
        .route("/admin/cikis", post(gazete_web::logout))
        .route("/admin", get(gazete_web::dashboard))
        .route("/admin/haberler", get(gazete_web::admin_articles))
        .route(
            "/admin/haberler/yeni",
            get(gazete_web::admin_article_new).post(gazete_web::admin_article_create),
        )
        .route(
            "/admin/haberler/:id",
            get(gazete_web::admin_article_edit).post(gazete_web::admin_article_update),
        )
        .route(
            "/admin/haberler/:id/sil",
            post(gazete_web::admin_article_delete),
        )
        .route("/admin/yorumlar", get(gazete_web::admin_comments))
        .route(
            "/admin/yorumlar/:id/durum",
            post(gazete_web::admin_comment_set_status),
        )
        .route(
            "/admin/yorumlar/:id/sil",
            post(gazete_web::admin_comment_delete),
        )
        .route("/admin/ayarlar", get(gazete_web::admin_settings))
        .route(
            "/admin/ayarlar/site",
            post(gazete_web::admin_settings_save_site),
        )
        .route(
            "/admin/ayarlar/tema",
            post(gazete_web::admin_settings_save_theme),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
