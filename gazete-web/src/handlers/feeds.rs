use crate::app_state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use gazete_api::cms::ArticleQuery;
use gazete_service::feed::{render_news_sitemap, render_rss, render_sitemap};

const FEED_CACHE_CONTROL: &str = "public, max-age=300, s-maxage=300";

fn xml_response(xml: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        xml,
    )
        .into_response()
}

/// RSS 2.0输出（最近50条）
pub async fn rss_feed(State(state): State<AppState>) -> Response {
    let (list, settings) = tokio::join!(
        state.article_service.list(ArticleQuery {
            page_size: 50,
            ..Default::default()
        }),
        state.settings_service.site(),
    );

    let mut context = state.site.feed_context();
    if let Some(settings) = settings {
        if let Some(site_name) = settings.site_name {
            context.site_name = site_name;
        }
        if let Some(description) = settings.default_seo_description {
            context.site_description = description;
        }
    }

    xml_response(render_rss(&list.items, &context, Utc::now()))
}

/// Google News sitemap（最近48小时）
pub async fn news_sitemap(State(state): State<AppState>) -> Response {
    let now = Utc::now();
    let (articles, settings) = tokio::join!(
        state.article_service.recent_news(now),
        state.settings_service.site(),
    );

    let mut context = state.site.feed_context();
    if let Some(site_name) = settings.and_then(|s| s.site_name) {
        context.site_name = site_name;
    }

    xml_response(render_news_sitemap(&articles, &context))
}

/// 通用sitemap：文章/分类/作者URL
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let (slugs, categories, authors) = tokio::join!(
        state.article_service.slugs(),
        state.category_service.list_active(),
        state.author_service.list_active(),
    );

    let context = state.site.feed_context();
    xml_response(render_sitemap(
        &slugs,
        &categories,
        &authors,
        &context,
        Utc::now(),
    ))
}
