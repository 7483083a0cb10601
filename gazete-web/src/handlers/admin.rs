use super::render;
use crate::app_state::AppState;
use crate::extractors::{AdminAuth, ADMIN_JWT_COOKIE};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, NaiveDateTime, Utc};
use gazete_domain::content::{Article, ArticleDraft, ArticleStatus, CommentStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// 登录表单
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
}

/// 登录页
/// GET /admin/giris
pub async fn login_form(State(state): State<AppState>) -> Response {
    let mut context = tera::Context::new();
    context.insert("hata", &Option::<String>::None);
    context.insert("identifier", "");
    render(&state, "admin/giris.html", &context)
}

/// 凭据交给CMS校验，成功后JWT落Cookie
/// POST /admin/giris
///
/// 失败时错误信息内联回显，不丢用户已填的内容。
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state
        .auth_service
        .login(&form.identifier, &form.password)
        .await
    {
        Ok(session) => {
            // 会话Cookie：浏览器会话期内有效，不做刷新
            let cookie = Cookie::build((ADMIN_JWT_COOKIE, session.jwt))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), Redirect::to("/admin")).into_response()
        }
        Err(e) => {
            let mut context = tera::Context::new();
            context.insert("hata", &e.to_string());
            context.insert("identifier", &form.identifier);
            render(&state, "admin/giris.html", &context)
        }
    }
}

/// 退出登录
/// POST /admin/cikis
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((ADMIN_JWT_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Redirect::to("/admin/giris"))
}

/// 后台首页（计数面板）
/// GET /admin
pub async fn dashboard(State(state): State<AppState>, auth: AdminAuth) -> Response {
    let (articles, pending) = tokio::join!(
        state.article_service.admin_list(1, &auth.token),
        state
            .comment_service
            .admin_list(CommentStatus::Pending, &auth.token),
    );

    let article_total = articles
        .as_ref()
        .ok()
        .and_then(|list| list.pagination.map(|p| p.total))
        .unwrap_or(0);
    let pending_total = pending.map(|list| list.len()).unwrap_or(0);

    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("haber_sayisi", &article_total);
    context.insert("bekleyen_yorum", &pending_total);
    render(&state, "admin/index.html", &context)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListParams {
    pub sayfa: Option<u32>,
    pub durum: Option<String>,
    pub hata: Option<String>,
    pub kayit: Option<String>,
}

/// 文章列表（含草稿）
/// GET /admin/haberler
pub async fn admin_articles(
    State(state): State<AppState>,
    auth: AdminAuth,
    Query(params): Query<AdminListParams>,
) -> Response {
    let page = params.sayfa.unwrap_or(1);
    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("sayfa", &page);
    context.insert("hata_kodu", &params.hata);
    context.insert("hata", &Option::<String>::None);
    context.insert("sayfalama", &Option::<gazete_api::cms::Pagination>::None);

    match state.article_service.admin_list(page, &auth.token).await {
        Ok(list) => {
            context.insert("haberler", &list.items);
            context.insert("sayfalama", &list.pagination);
        }
        Err(e) => {
            context.insert("hata", &e.to_string());
            context.insert("haberler", &Vec::<Article>::new());
        }
    }
    render(&state, "admin/haberler.html", &context)
}

/// 文章编辑表单（创建与更新共用）
///
/// 字段名就是CMS的wire字段名，模板里原样回显。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleForm {
    pub baslik: String,
    pub slug: String,
    #[serde(default)]
    pub spot: String,
    #[serde(default)]
    pub icerik: String,
    #[serde(default)]
    pub kategori: String,
    #[serde(default)]
    pub yazar: String,
    #[serde(default)]
    pub manset: Option<String>,
    #[serde(default)]
    pub sondakika: Option<String>,
    #[serde(default = "default_durum")]
    pub durum: String,
    #[serde(default)]
    pub yayin_tarihi: String,
    #[serde(default)]
    pub news_keywords: String,
    #[serde(default)]
    pub seo_title: String,
    #[serde(default)]
    pub seo_description: String,
}

fn default_durum() -> String {
    "taslak".to_string()
}

fn none_if_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// datetime-local（2026-08-07T12:30）或RFC3339
fn parse_publish_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

impl ArticleForm {
    fn to_draft(&self) -> ArticleDraft {
        let durum = match self.durum.as_str() {
            "yayinda" => ArticleStatus::Published,
            "arsiv" => ArticleStatus::Archived,
            _ => ArticleStatus::Draft,
        };
        ArticleDraft {
            baslik: self.baslik.trim().to_string(),
            slug: self.slug.trim().to_string(),
            spot: none_if_empty(&self.spot),
            icerik: none_if_empty(&self.icerik),
            kategori: self.kategori.trim().parse().ok(),
            yazar: self.yazar.trim().parse().ok(),
            manset: self.manset.is_some(),
            sondakika: self.sondakika.is_some(),
            durum,
            yayin_tarihi: parse_publish_date(&self.yayin_tarihi),
            news_keywords: none_if_empty(&self.news_keywords),
            seo_title: none_if_empty(&self.seo_title),
            seo_description: none_if_empty(&self.seo_description),
        }
    }

    fn from_article(article: &Article) -> Self {
        Self {
            baslik: article.title.clone(),
            slug: article.slug.clone(),
            spot: article.summary.clone().unwrap_or_default(),
            icerik: article.body.clone().unwrap_or_default(),
            kategori: article
                .category
                .as_ref()
                .map(|c| c.id.to_string())
                .unwrap_or_default(),
            yazar: article
                .author
                .as_ref()
                .map(|a| a.id.to_string())
                .unwrap_or_default(),
            manset: article.featured.then(|| "true".to_string()),
            sondakika: article.breaking.then(|| "true".to_string()),
            durum: match article.status {
                Some(ArticleStatus::Published) => "yayinda".to_string(),
                Some(ArticleStatus::Archived) => "arsiv".to_string(),
                _ => "taslak".to_string(),
            },
            yayin_tarihi: article
                .published_at
                .map(|d| d.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            news_keywords: article.news_keywords.clone().unwrap_or_default(),
            seo_title: article.seo_title.clone().unwrap_or_default(),
            seo_description: article.seo_description.clone().unwrap_or_default(),
        }
    }
}

/// 表单页所需的分类/作者选项
async fn form_context(state: &AppState, auth: &AdminAuth) -> tera::Context {
    let (categories, authors) = tokio::join!(
        state.category_service.list_active(),
        state.author_service.list_active(),
    );
    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("kategoriler", &categories);
    context.insert("yazarlar", &authors);
    context.insert("hata", &Option::<String>::None);
    context
}

/// 新文章表单
/// GET /admin/haberler/yeni
pub async fn admin_article_new(State(state): State<AppState>, auth: AdminAuth) -> Response {
    let mut context = form_context(&state, &auth).await;
    context.insert("form", &ArticleForm::default());
    context.insert("eylem", "/admin/haberler/yeni");
    context.insert("yeni", &true);
    render(&state, "admin/haber_form.html", &context)
}

/// 创建文章
/// POST /admin/haberler/yeni
pub async fn admin_article_create(
    State(state): State<AppState>,
    auth: AdminAuth,
    Form(form): Form<ArticleForm>,
) -> Response {
    let mut draft = form.to_draft();
    if draft.durum == ArticleStatus::Published && draft.yayin_tarihi.is_none() {
        draft.yayin_tarihi = Some(Utc::now());
    }

    match state.article_service.create(draft, &auth.token).await {
        Ok(_) => Redirect::to("/admin/haberler").into_response(),
        Err(e) => {
            // 保留表单内容，错误内联展示，CMS状态未变
            let mut context = form_context(&state, &auth).await;
            context.insert("form", &form);
            context.insert("eylem", "/admin/haberler/yeni");
            context.insert("yeni", &true);
            context.insert("hata", &e.to_string());
            render(&state, "admin/haber_form.html", &context)
        }
    }
}

/// 编辑表单
/// GET /admin/haberler/:id
pub async fn admin_article_edit(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<i64>,
) -> Response {
    let mut context = form_context(&state, &auth).await;
    context.insert("eylem", &format!("/admin/haberler/{}", id));
    context.insert("yeni", &false);
    match state.article_service.admin_get(id, &auth.token).await {
        Ok(article) => {
            context.insert("form", &ArticleForm::from_article(&article));
        }
        Err(e) => {
            context.insert("hata", &e.to_string());
            context.insert("form", &ArticleForm::default());
        }
    }
    render(&state, "admin/haber_form.html", &context)
}

/// 更新文章
/// POST /admin/haberler/:id
pub async fn admin_article_update(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<i64>,
    Form(form): Form<ArticleForm>,
) -> Response {
    match state
        .article_service
        .update(id, form.to_draft(), &auth.token)
        .await
    {
        Ok(_) => Redirect::to("/admin/haberler").into_response(),
        Err(e) => {
            let mut context = form_context(&state, &auth).await;
            context.insert("eylem", &format!("/admin/haberler/{}", id));
            context.insert("yeni", &false);
            context.insert("form", &form);
            context.insert("hata", &e.to_string());
            render(&state, "admin/haber_form.html", &context)
        }
    }
}

/// 删除文章
/// POST /admin/haberler/:id/sil
pub async fn admin_article_delete(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<i64>,
) -> Redirect {
    if let Err(e) = state.article_service.delete(id, &auth.token).await {
        warn!(error = %e, article = id, "article delete failed");
        return Redirect::to("/admin/haberler?hata=silinemedi");
    }
    Redirect::to("/admin/haberler")
}

/// 评论审核队列
/// GET /admin/yorumlar
pub async fn admin_comments(
    State(state): State<AppState>,
    auth: AdminAuth,
    Query(params): Query<AdminListParams>,
) -> Response {
    let status = params
        .durum
        .as_deref()
        .and_then(CommentStatus::parse)
        .unwrap_or(CommentStatus::Pending);

    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("aktif_durum", status.as_wire());
    context.insert("hata_kodu", &params.hata);
    context.insert("hata", &Option::<String>::None);

    match state.comment_service.admin_list(status, &auth.token).await {
        Ok(comments) => context.insert("yorumlar", &comments),
        Err(e) => {
            context.insert("hata", &e.to_string());
            context.insert("yorumlar", &Vec::<gazete_domain::content::Comment>::new());
        }
    }
    render(&state, "admin/yorumlar.html", &context)
}

#[derive(Debug, Deserialize)]
pub struct ModerationForm {
    pub durum: String,
    /// 回跳的队列tab
    #[serde(default)]
    pub geri: String,
}

/// 审核/驳回
/// POST /admin/yorumlar/:id/durum
pub async fn admin_comment_set_status(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<i64>,
    Form(form): Form<ModerationForm>,
) -> Redirect {
    let back = if form.geri.is_empty() {
        "beklemede"
    } else {
        &form.geri
    };
    match CommentStatus::parse(&form.durum) {
        Some(status) => {
            if let Err(e) = state
                .comment_service
                .set_status(id, status, &auth.token)
                .await
            {
                warn!(error = %e, comment = id, "comment moderation failed");
                return Redirect::to(&format!("/admin/yorumlar?durum={}&hata=kaydedilemedi", back));
            }
            Redirect::to(&format!("/admin/yorumlar?durum={}", back))
        }
        None => Redirect::to(&format!("/admin/yorumlar?durum={}&hata=gecersiz", back)),
    }
}

/// 删除评论
/// POST /admin/yorumlar/:id/sil
pub async fn admin_comment_delete(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<i64>,
    Form(form): Form<ModerationForm>,
) -> Redirect {
    let back = if form.geri.is_empty() {
        "beklemede"
    } else {
        &form.geri
    };
    if let Err(e) = state.comment_service.delete(id, &auth.token).await {
        warn!(error = %e, comment = id, "comment delete failed");
        return Redirect::to(&format!("/admin/yorumlar?durum={}&hata=silinemedi", back));
    }
    Redirect::to(&format!("/admin/yorumlar?durum={}", back))
}

/// 站点与主题设置
/// GET /admin/ayarlar
pub async fn admin_settings(
    State(state): State<AppState>,
    auth: AdminAuth,
    Query(params): Query<AdminListParams>,
) -> Response {
    let (site, theme) = tokio::join!(
        state.settings_service.site(),
        state.settings_service.theme(),
    );
    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("ayarlar", &site);
    context.insert("tema_ayarlari", &theme);
    context.insert("kayit", &params.kayit);
    context.insert("hata", &Option::<String>::None);
    render(&state, "admin/ayarlar.html", &context)
}

#[derive(Debug, Deserialize)]
pub struct SiteSettingsForm {
    #[serde(default)]
    pub site_adi: String,
    #[serde(default)]
    pub default_seo_description: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub iletisim_email: String,
}

/// 保存站点设置
/// POST /admin/ayarlar/site
pub async fn admin_settings_save_site(
    State(state): State<AppState>,
    auth: AdminAuth,
    Form(form): Form<SiteSettingsForm>,
) -> Response {
    let patch = json!({
        "site_adi": none_if_empty(&form.site_adi),
        "default_seo_description": none_if_empty(&form.default_seo_description),
        "twitter": none_if_empty(&form.twitter),
        "facebook": none_if_empty(&form.facebook),
        "instagram": none_if_empty(&form.instagram),
        "iletisim_email": none_if_empty(&form.iletisim_email),
    });
    match state.settings_service.update_site(patch, &auth.token).await {
        Ok(()) => Redirect::to("/admin/ayarlar?kayit=site").into_response(),
        Err(e) => settings_error(&state, &auth, e.to_string()).await,
    }
}

#[derive(Debug, Deserialize)]
pub struct ThemeSettingsForm {
    #[serde(default)]
    pub varsayilan_tema: String,
    #[serde(default)]
    pub ana_renk: String,
    #[serde(default)]
    pub ikincil_renk: String,
    #[serde(default)]
    pub vurgu_renk: String,
    #[serde(default)]
    pub baslik_fontu: String,
    #[serde(default)]
    pub govde_fontu: String,
    #[serde(default)]
    pub font_size_base: String,
    #[serde(default)]
    pub layout_style: String,
}

/// 保存主题设置
/// POST /admin/ayarlar/tema
pub async fn admin_settings_save_theme(
    State(state): State<AppState>,
    auth: AdminAuth,
    Form(form): Form<ThemeSettingsForm>,
) -> Response {
    let patch = json!({
        "varsayilan_tema": none_if_empty(&form.varsayilan_tema),
        "ana_renk": none_if_empty(&form.ana_renk),
        "ikincil_renk": none_if_empty(&form.ikincil_renk),
        "vurgu_renk": none_if_empty(&form.vurgu_renk),
        "baslik_fontu": none_if_empty(&form.baslik_fontu),
        "govde_fontu": none_if_empty(&form.govde_fontu),
        "font_size_base": form.font_size_base.trim().parse::<u32>().ok(),
        "layout_style": none_if_empty(&form.layout_style),
    });
    match state
        .settings_service
        .update_theme(patch, &auth.token)
        .await
    {
        Ok(()) => Redirect::to("/admin/ayarlar?kayit=tema").into_response(),
        Err(e) => settings_error(&state, &auth, e.to_string()).await,
    }
}

/// 保存失败：重新取当前设置，错误内联展示
async fn settings_error(state: &AppState, auth: &AdminAuth, message: String) -> Response {
    let (site, theme) = tokio::join!(
        state.settings_service.site(),
        state.settings_service.theme(),
    );
    let mut context = tera::Context::new();
    context.insert("kullanici", &auth.user);
    context.insert("ayarlar", &site);
    context.insert("tema_ayarlari", &theme);
    context.insert("kayit", &Option::<String>::None);
    context.insert("hata", &message);
    render(state, "admin/ayarlar.html", &context)
}
