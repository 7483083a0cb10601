use serde::{Deserialize, Serialize};

/// CMS媒体对象（按需裁剪字段，全部可缺省）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "alternativeText", default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Media {
    /// 相对路径拼上CMS基地址，绝对URL原样返回
    pub fn absolute_url(&self, cms_base: &str) -> Option<String> {
        let url = self.url.as_deref()?;
        if url.starts_with("http") {
            Some(url.to_string())
        } else {
            Some(format!("{}{}", cms_base.trim_end_matches('/'), url))
        }
    }
}
