use super::author::Author;
use super::category::Category;
use super::media::Media;
use super::tag::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Haber实体（展平后的CMS记录）
///
/// 列表端点会按populate指令裁剪字段，所以除id外一切可缺省。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "baslik", default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// 导语
    #[serde(rename = "spot", default)]
    pub summary: Option<String>,
    /// HTML正文
    #[serde(rename = "icerik", default)]
    pub body: Option<String>,
    #[serde(rename = "yayin_tarihi", default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(rename = "okunma_sayisi", default)]
    pub read_count: Option<i64>,
    #[serde(rename = "kapak_resmi", default)]
    pub cover: Option<Media>,
    #[serde(rename = "kategori", default)]
    pub category: Option<Category>,
    #[serde(rename = "yazar", default)]
    pub author: Option<Author>,
    #[serde(rename = "etiketler", default)]
    pub tags: Option<Vec<Tag>>,
    /// 头条标记
    #[serde(rename = "manset", default)]
    pub featured: bool,
    #[serde(rename = "manset_sira", default)]
    pub featured_order: Option<i32>,
    /// 快讯标记
    #[serde(rename = "sondakika", default)]
    pub breaking: bool,
    #[serde(rename = "durum", default)]
    pub status: Option<ArticleStatus>,
    #[serde(rename = "news_keywords", default)]
    pub news_keywords: Option<String>,
    #[serde(rename = "seo_title", default)]
    pub seo_title: Option<String>,
    #[serde(rename = "seo_description", default)]
    pub seo_description: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// 检查文章是否已发布
    pub fn is_published(&self) -> bool {
        matches!(self.status, Some(ArticleStatus::Published))
    }
}

/// 文章状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleStatus {
    #[default]
    #[serde(rename = "taslak")]
    Draft,
    #[serde(rename = "yayinda")]
    Published,
    #[serde(rename = "arsiv")]
    Archived,
}

/// sitemap用的轻量记录，只取slug和更新时间
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSlug {
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 后台创建/更新文章的载荷，序列化为CMS的data包体
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleDraft {
    pub baslik: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icerik: Option<String>,
    /// 关联按id引用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yazar: Option<i64>,
    pub manset: bool,
    pub sondakika: bool,
    pub durum: ArticleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yayin_tarihi: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_from_flat_json() {
        let flat = json!({
            "id": 7,
            "baslik": "Secim sonuclari aciklandi",
            "slug": "secim-sonuclari",
            "spot": "Ozet",
            "sondakika": true,
            "durum": "yayinda",
            "kategori": { "id": 2, "isim": "Gundem", "slug": "gundem", "renk": "#dc2626" },
            "yayin_tarihi": "2026-08-01T09:30:00.000Z"
        });
        let article: Article = serde_json::from_value(flat).unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.title, "Secim sonuclari aciklandi");
        assert!(article.breaking);
        assert!(!article.featured);
        assert!(article.is_published());
        assert_eq!(article.category.as_ref().unwrap().name, "Gundem");
    }

    #[test]
    fn test_article_tolerates_sparse_payload() {
        // fields[]裁剪后的记录只带slug
        let flat = json!({ "id": 1, "slug": "kisa", "updatedAt": "2026-08-01T00:00:00.000Z" });
        let article: Article = serde_json::from_value(flat.clone()).unwrap();
        assert_eq!(article.title, "");
        assert!(article.status.is_none());

        let slug: ArticleSlug = serde_json::from_value(flat).unwrap();
        assert_eq!(slug.slug, "kisa");
        assert!(slug.updated_at.is_some());
    }

    #[test]
    fn test_draft_serializes_to_wire_names() {
        let draft = ArticleDraft {
            baslik: "Yeni haber".to_string(),
            slug: "yeni-haber".to_string(),
            kategori: Some(3),
            durum: ArticleStatus::Published,
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["baslik"], json!("Yeni haber"));
        assert_eq!(value["durum"], json!("yayinda"));
        assert_eq!(value["kategori"], json!(3));
        assert!(value.get("spot").is_none());
    }
}
