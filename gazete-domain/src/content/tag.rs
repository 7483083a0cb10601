use serde::{Deserialize, Serialize};

/// Etiket实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "isim", default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}
