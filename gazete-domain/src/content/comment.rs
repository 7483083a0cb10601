use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Yorum实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "icerik", default)]
    pub content: String,
    /// 所属文章（populate后为展平的关联对象）
    #[serde(rename = "haber", default)]
    pub article: Option<Value>,
    /// 父评论引用，形成评论树
    #[serde(rename = "parent_yorum", default)]
    pub parent: Option<CommentRef>,
    #[serde(rename = "misafir_adi", default)]
    pub guest_name: Option<String>,
    #[serde(rename = "misafir_email", default)]
    pub guest_email: Option<String>,
    /// 注册用户（可空，与misafir_*二选一）
    #[serde(rename = "kullanici", default)]
    pub user: Option<CmsUser>,
    #[serde(rename = "durum", default)]
    pub status: Option<CommentStatus>,
    #[serde(rename = "begeni_sayisi", default)]
    pub like_count: i64,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// 显示名：注册用户名优先，其次访客名
    pub fn display_name(&self) -> &str {
        if let Some(ref user) = self.user {
            if !user.username.is_empty() {
                return &user.username;
            }
        }
        self.guest_name.as_deref().unwrap_or("Anonim")
    }

    pub fn is_approved(&self) -> bool {
        matches!(self.status, Some(CommentStatus::Approved))
    }
}

/// 父评论引用（展平后至少带id）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CommentRef {
    #[serde(default)]
    pub id: i64,
}

/// CMS注册用户（评论展示所需的最小字段）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmsUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
}

/// 评论状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentStatus {
    #[default]
    #[serde(rename = "beklemede")]
    Pending,
    #[serde(rename = "onaylandi")]
    Approved,
    #[serde(rename = "reddedildi")]
    Rejected,
}

impl CommentStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "beklemede",
            CommentStatus::Approved => "onaylandi",
            CommentStatus::Rejected => "reddedildi",
        }
    }

    pub fn parse(s: &str) -> Option<CommentStatus> {
        match s {
            "beklemede" => Some(CommentStatus::Pending),
            "onaylandi" => Some(CommentStatus::Approved),
            "reddedildi" => Some(CommentStatus::Rejected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_display_name_prefers_user() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 1,
            "icerik": "merhaba",
            "kullanici": { "id": 5, "username": "ayse" },
            "misafir_adi": "Misafir"
        }))
        .unwrap();
        assert_eq!(comment.display_name(), "ayse");
    }

    #[test]
    fn test_comment_guest_fallback() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 2,
            "icerik": "selam",
            "misafir_adi": "Mehmet",
            "durum": "onaylandi",
            "parent_yorum": { "id": 1 }
        }))
        .unwrap();
        assert_eq!(comment.display_name(), "Mehmet");
        assert!(comment.is_approved());
        assert_eq!(comment.parent.unwrap().id, 1);
    }

    #[test]
    fn test_comment_without_parent() {
        let comment: Comment =
            serde_json::from_value(json!({ "id": 3, "icerik": "x", "parent_yorum": null }))
                .unwrap();
        assert!(comment.parent.is_none());
        assert_eq!(comment.display_name(), "Anonim");
    }
}
