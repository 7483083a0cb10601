use regex::{Captures, Regex};
use std::sync::LazyLock;

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img([^>]*?)src="([^"]*)"([^>]*)>"#).unwrap());
static IFRAME_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<iframe([^>]*)>").unwrap());
static IFRAME_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</iframe>").unwrap());

/// CMS正文HTML转AMP变体
///
/// img改写为amp-img（相对src拼上CMS基地址，补layout/width/height），
/// iframe改写为amp-iframe（补layout与sandbox），其余属性原样保留。
pub fn to_amp_html(html: &str, cms_base: &str) -> String {
    let cms_base = cms_base.trim_end_matches('/');

    let with_images = IMG_RE.replace_all(html, |caps: &Captures| {
        let before = &caps[1];
        let src = &caps[2];
        let after = &caps[3];
        let full_src = if src.starts_with("http") {
            src.to_string()
        } else {
            format!("{}{}", cms_base, src)
        };
        format!(
            r#"<amp-img{}src="{}"{} layout="responsive" width="800" height="450"></amp-img>"#,
            before, full_src, after
        )
    });

    let with_iframes = IFRAME_OPEN_RE.replace_all(
        &with_images,
        r#"<amp-iframe$1 layout="responsive" sandbox="allow-scripts allow-same-origin">"#,
    );

    IFRAME_CLOSE_RE
        .replace_all(&with_iframes, "</amp-iframe>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_img_rewritten_with_layout() {
        let html = r#"<p>once</p><img class="w-full" src="/uploads/a.jpg" alt="kapak">"#;
        let amp = to_amp_html(html, "http://localhost:1337");
        assert!(amp.contains(
            r#"<amp-img class="w-full" src="http://localhost:1337/uploads/a.jpg" alt="kapak" layout="responsive" width="800" height="450"></amp-img>"#
        ));
        assert!(!amp.contains("<img"));
    }

    #[test]
    fn test_absolute_src_kept() {
        let html = r#"<img src="https://cdn.example.com/b.png">"#;
        let amp = to_amp_html(html, "http://localhost:1337");
        assert!(amp.contains(r#"src="https://cdn.example.com/b.png""#));
    }

    #[test]
    fn test_iframe_rewritten_with_sandbox() {
        let html = r#"<iframe width="560" src="https://www.youtube.com/embed/x"></iframe>"#;
        let amp = to_amp_html(html, "http://localhost:1337");
        assert!(amp.contains(
            r#"<amp-iframe width="560" src="https://www.youtube.com/embed/x" layout="responsive" sandbox="allow-scripts allow-same-origin">"#
        ));
        assert!(amp.ends_with("</amp-iframe>"));
    }

    #[test]
    fn test_plain_html_untouched() {
        let html = "<p>duz <strong>metin</strong></p>";
        assert_eq!(to_amp_html(html, "http://localhost:1337"), html);
    }
}
