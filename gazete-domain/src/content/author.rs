use super::media::Media;
use serde::{Deserialize, Serialize};

/// Yazar实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "isim", default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "biyografi", default)]
    pub bio: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo: Option<Media>,
    #[serde(rename = "aktif", default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

fn default_true() -> bool {
    true
}
