use serde::{Deserialize, Serialize};

/// Kategori实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "isim", default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// 栏目主色（hex）
    #[serde(rename = "renk", default)]
    pub color: Option<String>,
    #[serde(rename = "aktif", default = "default_true")]
    pub active: bool,
    #[serde(rename = "sira", default)]
    pub order: Option<i32>,
}

fn default_true() -> bool {
    true
}
