use crate::app_state::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use gazete_domain::settings::ThemeSettings;
use gazete_domain::theme::{ResolvedTheme, ThemeMode};
use gazete_infra::theme::{css_block, css_variables, ThemeState};
use gazete_service::security::AdminUser;
use serde::Serialize;

/// 主题偏好Cookie（localStorage的服务端等价物）
pub const THEME_COOKIE: &str = "theme";

/// 管理端JWT Cookie，浏览器会话期内持有
pub const ADMIN_JWT_COOKIE: &str = "admin_jwt";

/// 请求级主题上下文，注入模板
#[derive(Debug, Clone, Serialize)]
pub struct ThemeContext {
    /// 用户选择（light/dark/system）
    pub mode: &'static str,
    /// 解析后的具体值（light/dark），挂到data-theme
    pub resolved: &'static str,
    /// 内联的:root{--…}样式块
    pub css: String,
}

/// 客户端系统偏好：Sec-CH-Prefers-Color-Scheme请求提示，缺省为light
pub fn system_preference(headers: &HeaderMap) -> ResolvedTheme {
    match headers
        .get("sec-ch-prefers-color-scheme")
        .and_then(|v| v.to_str().ok())
    {
        Some("dark") => ResolvedTheme::Dark,
        _ => ResolvedTheme::Light,
    }
}

/// Cookie里的持久主题偏好
pub fn saved_theme(jar: &CookieJar) -> Option<ThemeMode> {
    jar.get(THEME_COOKIE)
        .and_then(|cookie| ThemeMode::parse(cookie.value()))
}

/// 装配请求的主题上下文
///
/// 偏好链：Cookie → CMS主题设置的varsayilan_tema → 配置默认 → system。
pub fn theme_context(
    jar: &CookieJar,
    headers: &HeaderMap,
    theme_settings: Option<&ThemeSettings>,
    config_default: Option<ThemeMode>,
) -> ThemeContext {
    let settings_default = theme_settings
        .and_then(|s| s.default_mode.as_deref())
        .and_then(ThemeMode::parse);
    let state = ThemeState::init(saved_theme(jar), settings_default.or(config_default));
    let resolved = state.resolve(system_preference(headers));

    let css = match theme_settings {
        Some(settings) => css_block(&css_variables(settings, resolved)),
        None => String::new(),
    };

    ThemeContext {
        mode: state.mode().as_str(),
        resolved: resolved.as_str(),
        css,
    }
}

/// 已登录编辑：Cookie里的JWT经CMS校验通过
///
/// 未登录或令牌失效时直接重定向到登录页。
pub struct AdminAuth {
    pub token: String,
    pub user: AdminUser,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ADMIN_JWT_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| Redirect::to("/admin/giris"))?;
        match state.auth_service.current_user(&token).await {
            Some(user) => Ok(AdminAuth { token, user }),
            None => Err(Redirect::to("/admin/giris")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use gazete_domain::settings::ThemeSettings;

    fn headers_with_scheme(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "sec-ch-prefers-color-scheme",
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_system_preference_defaults_to_light() {
        assert_eq!(system_preference(&HeaderMap::new()), ResolvedTheme::Light);
        assert_eq!(
            system_preference(&headers_with_scheme("dark")),
            ResolvedTheme::Dark
        );
        assert_eq!(
            system_preference(&headers_with_scheme("light")),
            ResolvedTheme::Light
        );
    }

    #[test]
    fn test_theme_context_resolves_system_via_hint() {
        let jar = CookieJar::new();
        let settings = ThemeSettings {
            default_mode: Some("system".to_string()),
            primary_color: Some("#dc2626".to_string()),
            ..Default::default()
        };
        let context = theme_context(
            &jar,
            &headers_with_scheme("dark"),
            Some(&settings),
            None,
        );
        assert_eq!(context.mode, "system");
        assert_eq!(context.resolved, "dark");
        assert!(context.css.contains("--color-primary:#dc2626"));
        assert!(context.css.contains("--color-primary-hsl:0 72% 51%"));
    }

    #[test]
    fn test_theme_context_cookie_overrides_defaults() {
        let jar = CookieJar::new().add(cookie::Cookie::new(THEME_COOKIE, "light"));
        let context = theme_context(&jar, &headers_with_scheme("dark"), None, None);
        assert_eq!(context.mode, "light");
        assert_eq!(context.resolved, "light");
        assert!(context.css.is_empty());
    }
}
