use crate::content::Media;
use serde::{Deserialize, Serialize};

/// 站点设置（CMS单例 site-ayarlari）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "site_adi", default)]
    pub site_name: Option<String>,
    #[serde(rename = "default_seo_description", default)]
    pub default_seo_description: Option<String>,
    #[serde(default)]
    pub logo: Option<Media>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(rename = "iletisim_email", default)]
    pub contact_email: Option<String>,
}

/// 主题设置（CMS单例 tema-ayarlari）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default)]
    pub id: i64,
    /// light | dark | system
    #[serde(rename = "varsayilan_tema", default)]
    pub default_mode: Option<String>,
    #[serde(rename = "ana_renk", default)]
    pub primary_color: Option<String>,
    #[serde(rename = "ikincil_renk", default)]
    pub secondary_color: Option<String>,
    #[serde(rename = "vurgu_renk", default)]
    pub accent_color: Option<String>,
    #[serde(rename = "baslik_fontu", default)]
    pub heading_font: Option<String>,
    #[serde(rename = "govde_fontu", default)]
    pub body_font: Option<String>,
    #[serde(rename = "font_size_base", default)]
    pub base_font_size: Option<u32>,
    #[serde(rename = "layout_style", default)]
    pub layout_style: Option<String>,
    #[serde(rename = "light_mode", default)]
    pub light_mode: Option<ModePalette>,
    #[serde(rename = "dark_mode", default)]
    pub dark_mode: Option<ModePalette>,
}

/// 亮/暗模式各自的子调色板
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModePalette {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(rename = "text_primary", default)]
    pub text_primary: Option<String>,
    #[serde(rename = "text_secondary", default)]
    pub text_secondary: Option<String>,
    #[serde(default)]
    pub border: Option<String>,
}
