pub mod admin;
pub mod comments;
pub mod feeds;
pub mod pages;
pub mod theme;

pub use admin::*;
pub use comments::*;
pub use feeds::*;
pub use pages::*;
pub use theme::*;

use crate::app_state::AppState;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

/// 模板渲染，失败时退回简单500
pub(crate) fn render(state: &AppState, template: &str, context: &tera::Context) -> Response {
    render_with_status(state, template, context, StatusCode::OK)
}

pub(crate) fn render_with_status(
    state: &AppState,
    template: &str,
    context: &tera::Context,
    status: StatusCode,
) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(template, error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Sunucu hatasi").into_response()
        }
    }
}
