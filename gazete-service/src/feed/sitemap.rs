use super::{escape_xml, FeedContext};
use chrono::{DateTime, SecondsFormat, Utc};
use gazete_domain::content::{Article, ArticleSlug, Author, Category};
use std::fmt::Write;

/// Google News sitemap（最近48小时的文章）
pub fn render_news_sitemap(articles: &[Article], context: &FeedContext) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" "#,
        r#"xmlns:news="http://www.google.com/schemas/sitemap-news/0.9" "#,
        r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">"#,
    ));
    xml.push('\n');

    for article in articles {
        xml.push_str("  <url>\n");
        let _ = writeln!(
            xml,
            "    <loc>{}/haber/{}</loc>",
            context.site_url, article.slug
        );
        xml.push_str("    <news:news>\n");
        xml.push_str("      <news:publication>\n");
        let _ = writeln!(
            xml,
            "        <news:name>{}</news:name>",
            escape_xml(&context.site_name)
        );
        let _ = writeln!(
            xml,
            "        <news:language>{}</news:language>",
            context.language
        );
        xml.push_str("      </news:publication>\n");
        if let Some(published_at) = article.published_at {
            let _ = writeln!(
                xml,
                "      <news:publication_date>{}</news:publication_date>",
                published_at.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
        }
        let _ = writeln!(
            xml,
            "      <news:title>{}</news:title>",
            escape_xml(&article.title)
        );
        if let Some(ref keywords) = article.news_keywords {
            let _ = writeln!(
                xml,
                "      <news:keywords>{}</news:keywords>",
                escape_xml(keywords)
            );
        }
        xml.push_str("    </news:news>\n");
        if let Some(image_url) = article
            .cover
            .as_ref()
            .and_then(|cover| cover.absolute_url(&context.cms_url))
        {
            xml.push_str("    <image:image>\n");
            let _ = writeln!(xml, "      <image:loc>{}</image:loc>", image_url);
            let _ = writeln!(
                xml,
                "      <image:title>{}</image:title>",
                escape_xml(&article.title)
            );
            xml.push_str("    </image:image>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// 通用sitemap：文章、分类、作者URL
///
/// lastmod优先用CMS的更新时间，否则退回当前时刻。
pub fn render_sitemap(
    articles: &[ArticleSlug],
    categories: &[Category],
    authors: &[Author],
    context: &FeedContext,
    now: DateTime<Utc>,
) -> String {
    let now_str = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for article in articles {
        let lastmod = article
            .updated_at
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| now_str.clone());
        push_url(
            &mut xml,
            &format!("{}/haber/{}", context.site_url, article.slug),
            &lastmod,
            "daily",
            "0.8",
        );
    }
    for category in categories {
        push_url(
            &mut xml,
            &format!("{}/kategori/{}", context.site_url, category.slug),
            &now_str,
            "hourly",
            "0.9",
        );
    }
    for author in authors {
        push_url(
            &mut xml,
            &format!("{}/yazar/{}", context.site_url, author.slug),
            &now_str,
            "weekly",
            "0.6",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(loc));
    let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod);
    let _ = writeln!(xml, "    <changefreq>{}</changefreq>", changefreq);
    let _ = writeln!(xml, "    <priority>{}</priority>", priority);
    xml.push_str("  </url>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gazete_domain::content::Media;

    fn context() -> FeedContext {
        FeedContext {
            site_url: "https://gazete.example.com".to_string(),
            cms_url: "http://localhost:1337".to_string(),
            site_name: "Gazete".to_string(),
            site_description: String::new(),
            language: "tr".to_string(),
            generator: "gazete".to_string(),
        }
    }

    #[test]
    fn test_news_sitemap_structure() {
        let article = Article {
            title: "Seçim & sonuçlar".to_string(),
            slug: "secim-sonuclar".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap()),
            news_keywords: Some("seçim, siyaset".to_string()),
            cover: Some(Media {
                url: Some("/uploads/secim.jpg".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let xml = render_news_sitemap(&[article], &context());
        assert!(xml.contains("<loc>https://gazete.example.com/haber/secim-sonuclar</loc>"));
        assert!(xml.contains("<news:name>Gazete</news:name>"));
        assert!(xml.contains("<news:language>tr</news:language>"));
        assert!(xml.contains("<news:title>Seçim &amp; sonuçlar</news:title>"));
        assert!(xml.contains("<news:keywords>seçim, siyaset</news:keywords>"));
        assert!(xml.contains("<image:loc>http://localhost:1337/uploads/secim.jpg</image:loc>"));
    }

    #[test]
    fn test_news_sitemap_omits_missing_image_and_keywords() {
        let article = Article {
            title: "Kısa".to_string(),
            slug: "kisa".to_string(),
            ..Default::default()
        };
        let xml = render_news_sitemap(&[article], &context());
        assert!(!xml.contains("<image:image>"));
        assert!(!xml.contains("<news:keywords>"));
    }

    #[test]
    fn test_general_sitemap_sections() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        let articles = vec![ArticleSlug {
            slug: "bir".to_string(),
            updated_at: Some(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()),
        }];
        let categories = vec![Category {
            slug: "gundem".to_string(),
            ..Default::default()
        }];
        let authors = vec![Author {
            slug: "ayse".to_string(),
            ..Default::default()
        }];
        let xml = render_sitemap(&articles, &categories, &authors, &context(), now);

        assert!(xml.contains("<loc>https://gazete.example.com/haber/bir</loc>"));
        assert!(xml.contains("<lastmod>2026-08-01T00:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<loc>https://gazete.example.com/kategori/gundem</loc>"));
        assert!(xml.contains("<changefreq>hourly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.contains("<loc>https://gazete.example.com/yazar/ayse</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
    }
}
