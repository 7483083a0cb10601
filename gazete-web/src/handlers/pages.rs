use super::{render, render_with_status};
use crate::app_state::AppState;
use crate::extractors::{theme_context, ThemeContext};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use gazete_api::cms::ArticleQuery;
use gazete_domain::content::Category;
use gazete_domain::settings::SiteSettings;
use gazete_service::content::{build_comment_tree, to_amp_html};
use serde::Deserialize;

/// 列表页通用查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub sayfa: Option<u32>,
    pub q: Option<String>,
    /// 评论提交回跳时的结果标记
    pub yorum: Option<String>,
}

/// 公开页面共用的基础模板上下文
fn base_context(
    state: &AppState,
    theme: &ThemeContext,
    categories: &[Category],
    settings: Option<&SiteSettings>,
) -> tera::Context {
    let site_name = settings
        .and_then(|s| s.site_name.clone())
        .unwrap_or_else(|| state.site.name.clone());

    let mut context = tera::Context::new();
    context.insert("site_url", &state.site.base_url);
    context.insert("cms_url", &state.site.cms_url);
    context.insert("site_adi", &site_name);
    context.insert("ayarlar", &settings);
    context.insert("kategoriler", categories);
    context.insert("tema", theme);
    context
}

fn not_found(state: &AppState, mut context: tera::Context, message: &str) -> Response {
    context.insert("mesaj", message);
    render_with_status(state, "hata.html", &context, StatusCode::NOT_FOUND)
}

/// 首页：头条slider + 快讯条 + 最新列表
///
/// 相互独立的数据并发取齐后再渲染。
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let page = params.sayfa.unwrap_or(1);
    let (featured, breaking, latest, categories, settings, theme_settings) = tokio::join!(
        state.article_service.featured(5),
        state.article_service.breaking(5),
        state.article_service.list(ArticleQuery {
            page,
            page_size: 12,
            ..Default::default()
        }),
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let mut context = base_context(&state, &theme, &categories, settings.as_ref());
    context.insert("manset_haberler", &featured);
    context.insert("sondakika_haberler", &breaking);
    context.insert("son_haberler", &latest.items);
    context.insert("sayfalama", &latest.pagination);
    context.insert("sayfa", &page);
    render(&state, "index.html", &context)
}

/// 文章详情页
pub async fn article_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let (article, categories, settings, theme_settings) = tokio::join!(
        state.article_service.get_by_slug(&slug),
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let context = base_context(&state, &theme, &categories, settings.as_ref());
    let article = match article {
        Some(article) => article,
        None => return not_found(&state, context, "Haber bulunamadı"),
    };

    // 相关新闻与评论依赖文章本身，第二批并发取
    let category_slug = article
        .category
        .as_ref()
        .map(|c| c.slug.clone())
        .unwrap_or_default();
    let (related, comments) = tokio::join!(
        state.article_service.related(&slug, &category_slug, 4),
        state.comment_service.list_for_article(article.id),
    );

    // 阅读计数后台递增，不拖慢响应；丢失的计数可接受
    let article_service = state.article_service.clone();
    let article_id = article.id;
    tokio::spawn(async move {
        article_service.increment_read_count(article_id).await;
    });

    let mut context = context;
    context.insert("haber", &article);
    context.insert("ilgili_haberler", &related);
    context.insert("yorumlar", &build_comment_tree(comments));
    context.insert("yorum_durum", &params.yorum);
    render(&state, "haber.html", &context)
}

/// AMP变体：独立页面，canonical指回普通文章页
pub async fn article_amp(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let (article, settings) = tokio::join!(
        state.article_service.get_by_slug(&slug),
        state.settings_service.site(),
    );

    let article = match article {
        Some(article) => article,
        // AMP变体是独立页面，404用纯文本即可
        None => return (StatusCode::NOT_FOUND, "Haber bulunamadı").into_response(),
    };

    let amp_body = article
        .body
        .as_deref()
        .map(|body| to_amp_html(body, &state.site.cms_url))
        .unwrap_or_default();
    let site_name = settings
        .as_ref()
        .and_then(|s| s.site_name.clone())
        .unwrap_or_else(|| state.site.name.clone());

    let mut context = tera::Context::new();
    context.insert("site_url", &state.site.base_url);
    context.insert("cms_url", &state.site.cms_url);
    context.insert("site_adi", &site_name);
    context.insert("haber", &article);
    context.insert("amp_icerik", &amp_body);
    render(&state, "amp.html", &context)
}

/// 分类页
pub async fn category_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let page = params.sayfa.unwrap_or(1);
    let (category, list, categories, settings, theme_settings) = tokio::join!(
        state.category_service.get_by_slug(&slug),
        state.article_service.list(ArticleQuery {
            page,
            page_size: 12,
            category: Some(slug.clone()),
            ..Default::default()
        }),
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let mut context = base_context(&state, &theme, &categories, settings.as_ref());
    let category = match category {
        Some(category) => category,
        None => return not_found(&state, context, "Kategori bulunamadı"),
    };
    context.insert("kategori", &category);
    context.insert("haberler", &list.items);
    context.insert("sayfalama", &list.pagination);
    context.insert("sayfa", &page);
    render(&state, "kategori.html", &context)
}

/// 作者页
pub async fn author_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let page = params.sayfa.unwrap_or(1);
    let (author, list, categories, settings, theme_settings) = tokio::join!(
        state.author_service.get_by_slug(&slug),
        state.article_service.list(ArticleQuery {
            page,
            page_size: 12,
            author: Some(slug.clone()),
            ..Default::default()
        }),
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let mut context = base_context(&state, &theme, &categories, settings.as_ref());
    let author = match author {
        Some(author) => author,
        None => return not_found(&state, context, "Yazar bulunamadı"),
    };
    context.insert("yazar", &author);
    context.insert("haberler", &list.items);
    context.insert("sayfalama", &list.pagination);
    context.insert("sayfa", &page);
    render(&state, "yazar.html", &context)
}

/// 标签页
pub async fn tag_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let page = params.sayfa.unwrap_or(1);
    let (tag, list, categories, settings, theme_settings) = tokio::join!(
        state.tag_service.get_by_slug(&slug),
        state.article_service.list(ArticleQuery {
            page,
            page_size: 12,
            tag: Some(slug.clone()),
            ..Default::default()
        }),
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let mut context = base_context(&state, &theme, &categories, settings.as_ref());
    let tag = match tag {
        Some(tag) => tag,
        None => return not_found(&state, context, "Etiket bulunamadı"),
    };
    context.insert("etiket", &tag);
    context.insert("haberler", &list.items);
    context.insert("sayfalama", &list.pagination);
    context.insert("sayfa", &page);
    render(&state, "etiket.html", &context)
}

/// 搜索页（标题$containsi检索）
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let query = params.q.clone().unwrap_or_default();
    let (list, categories, settings, theme_settings) = tokio::join!(
        async {
            if query.trim().is_empty() {
                Default::default()
            } else {
                state
                    .article_service
                    .list(ArticleQuery {
                        page_size: 20,
                        search: Some(query.trim().to_string()),
                        ..Default::default()
                    })
                    .await
            }
        },
        state.category_service.list_active(),
        state.settings_service.site(),
        state.settings_service.theme(),
    );

    let theme = theme_context(
        &jar,
        &headers,
        theme_settings.as_ref(),
        state.site.default_theme,
    );
    let mut context = base_context(&state, &theme, &categories, settings.as_ref());
    context.insert("arama", &query);
    context.insert("haberler", &list.items);
    context.insert("sayfalama", &list.pagination);
    render(&state, "arama.html", &context)
}
