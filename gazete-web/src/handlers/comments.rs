use crate::app_state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use gazete_service::content::NewComment;
use serde::Deserialize;
use tracing::warn;

/// 访客评论表单
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub haber: i64,
    /// 回跳用的文章slug
    pub slug: String,
    #[serde(default)]
    pub parent_yorum: String,
    pub icerik: String,
    pub misafir_adi: String,
    pub misafir_email: String,
}

/// 提交访客评论
/// POST /yorumlar
///
/// 成功与失败都回跳到文章页，由页面展示结果条；
/// 状态以beklemede写入CMS等待审核。
pub async fn submit_comment(
    State(state): State<AppState>,
    Form(form): Form<CommentForm>,
) -> Redirect {
    let new = NewComment {
        haber: form.haber,
        parent_yorum: form.parent_yorum.parse().ok(),
        icerik: form.icerik,
        misafir_adi: form.misafir_adi,
        misafir_email: form.misafir_email,
    };
    match state.comment_service.submit(new).await {
        Ok(_) => Redirect::to(&format!("/haber/{}?yorum=gonderildi#yorumlar", form.slug)),
        Err(e) => {
            warn!(error = %e, "comment submit failed");
            Redirect::to(&format!("/haber/{}?yorum=hata#yorumlar", form.slug))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LikeForm {
    pub slug: String,
}

/// 点赞计数
/// POST /yorumlar/:id/begen
///
/// 乐观语义：失败只记日志，不重试。
pub async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<LikeForm>,
) -> Redirect {
    if let Err(e) = state.comment_service.like(id).await {
        warn!(error = %e, comment = id, "comment like failed");
    }
    Redirect::to(&format!("/haber/{}#yorumlar", form.slug))
}
