use crate::app_state::AppState;
use crate::extractors::{saved_theme, system_preference, THEME_COOKIE};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use gazete_domain::theme::ThemeMode;
use gazete_infra::theme::ThemeState;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    /// 显式选择（light/dark/system）；为空时翻转当前值
    #[serde(default)]
    pub secim: String,
    /// 回跳页面
    #[serde(default)]
    pub geri: String,
}

/// 切换主题
/// POST /tema
///
/// 翻转的是解析后的值，并把新选择写回Cookie持久化；
/// 手动切换后选择不再停留在system。
pub async fn set_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<ThemeForm>,
) -> (CookieJar, Redirect) {
    let theme_settings = state.settings_service.theme().await;
    let settings_default = theme_settings
        .as_ref()
        .and_then(|s| s.default_mode.as_deref())
        .and_then(ThemeMode::parse);

    let mut theme = ThemeState::init(
        saved_theme(&jar),
        settings_default.or(state.site.default_theme),
    );
    let persisted = match ThemeMode::parse(&form.secim) {
        Some(mode) => {
            theme.set_mode(mode);
            mode
        }
        None => theme.toggle(system_preference(&headers)),
    };

    let cookie = Cookie::build((THEME_COOKIE, persisted.as_str()))
        .path("/")
        .max_age(cookie::time::Duration::days(365))
        .build();
    let jar = jar.add(cookie);

    // 回跳：表单字段优先，否则Referer，最后首页
    let back = if form.geri.starts_with('/') {
        form.geri
    } else {
        headers
            .get(axum::http::header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| "/".to_string())
    };
    (jar, Redirect::to(&back))
}
