use super::{escape_xml, FeedContext};
use chrono::{DateTime, Utc};
use gazete_domain::content::Article;
use std::fmt::Write;

/// RSS 2.0输出（atom/media/dc命名空间）
///
/// 条目描述按外部契约走CDATA；封面图同时给media:content和enclosure。
pub fn render_rss(articles: &[Article], context: &FeedContext, now: DateTime<Utc>) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(concat!(
        r#"<rss version="2.0" "#,
        r#"xmlns:atom="http://www.w3.org/2005/Atom" "#,
        r#"xmlns:media="http://search.yahoo.com/mrss/" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
    ));
    xml.push('\n');
    xml.push_str("  <channel>\n");
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&context.site_name));
    let _ = writeln!(xml, "    <link>{}</link>", context.site_url);
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        escape_xml(&context.site_description)
    );
    let _ = writeln!(xml, "    <language>{}</language>", context.language);
    let _ = writeln!(xml, "    <lastBuildDate>{}</lastBuildDate>", now.to_rfc2822());
    let _ = writeln!(
        xml,
        r#"    <atom:link href="{}/rss/feed.xml" rel="self" type="application/rss+xml"/>"#,
        context.site_url
    );
    let _ = writeln!(xml, "    <generator>{}</generator>", escape_xml(&context.generator));

    for article in articles {
        let link = format!("{}/haber/{}", context.site_url, article.slug);
        xml.push_str("    <item>\n");
        let _ = writeln!(xml, "      <title>{}</title>", escape_xml(&article.title));
        let _ = writeln!(xml, "      <link>{}</link>", link);
        let _ = writeln!(
            xml,
            "      <description><![CDATA[{}]]></description>",
            article.summary.as_deref().unwrap_or("")
        );
        if let Some(published_at) = article.published_at {
            let _ = writeln!(xml, "      <pubDate>{}</pubDate>", published_at.to_rfc2822());
        }
        let _ = writeln!(xml, r#"      <guid isPermaLink="true">{}</guid>"#, link);
        if let Some(ref category) = article.category {
            let _ = writeln!(
                xml,
                "      <category>{}</category>",
                escape_xml(&category.name)
            );
        }
        if let Some(ref author) = article.author {
            let _ = writeln!(
                xml,
                "      <dc:creator>{}</dc:creator>",
                escape_xml(&author.name)
            );
        }
        if let Some(image_url) = article
            .cover
            .as_ref()
            .and_then(|cover| cover.absolute_url(&context.cms_url))
        {
            let _ = writeln!(xml, r#"      <media:content url="{}" medium="image"/>"#, image_url);
            let _ = writeln!(
                xml,
                r#"      <enclosure url="{}" type="image/jpeg"/>"#,
                image_url
            );
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gazete_domain::content::{Author, Category, Media};

    fn context() -> FeedContext {
        FeedContext {
            site_url: "https://gazete.example.com".to_string(),
            cms_url: "http://localhost:1337".to_string(),
            site_name: "Gazete & Haber".to_string(),
            site_description: "Güncel haberler".to_string(),
            language: "tr".to_string(),
            generator: "gazete".to_string(),
        }
    }

    fn article() -> Article {
        Article {
            id: 1,
            title: "Dolar & euro <yine> yükseldi".to_string(),
            slug: "dolar-euro".to_string(),
            summary: Some("Özet".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap()),
            category: Some(Category {
                name: "Ekonomi".to_string(),
                ..Default::default()
            }),
            author: Some(Author {
                name: "Ayşe Yılmaz".to_string(),
                ..Default::default()
            }),
            cover: Some(Media {
                url: Some("/uploads/dolar.jpg".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_rss_escapes_channel_and_item_text() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let xml = render_rss(&[article()], &context(), now);
        assert!(xml.contains("<title>Gazete &amp; Haber</title>"));
        assert!(xml.contains("<title>Dolar &amp; euro &lt;yine&gt; yükseldi</title>"));
    }

    #[test]
    fn test_rss_item_structure() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let xml = render_rss(&[article()], &context(), now);
        assert!(xml.contains("<description><![CDATA[Özet]]></description>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://gazete.example.com/haber/dolar-euro</guid>"#
        ));
        assert!(xml.contains("<dc:creator>Ayşe Yılmaz</dc:creator>"));
        assert!(xml.contains(
            r#"<media:content url="http://localhost:1337/uploads/dolar.jpg" medium="image"/>"#
        ));
        assert!(xml.contains(
            r#"<enclosure url="http://localhost:1337/uploads/dolar.jpg" type="image/jpeg"/>"#
        ));
        assert!(xml.contains("<category>Ekonomi</category>"));
    }

    #[test]
    fn test_rss_optional_parts_omitted() {
        let bare = Article {
            id: 2,
            title: "Kısa".to_string(),
            slug: "kisa".to_string(),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let xml = render_rss(&[bare], &context(), now);
        assert!(!xml.contains("<dc:creator>"));
        assert!(!xml.contains("<enclosure"));
        assert!(!xml.contains("<pubDate>"));
        assert!(xml.contains("<description><![CDATA[]]></description>"));
    }
}
