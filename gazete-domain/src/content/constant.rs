/// CMS集合与单例的API路径
pub const ARTICLE_COLLECTION: &str = "haberler";
pub const CATEGORY_COLLECTION: &str = "kategoriler";
pub const AUTHOR_COLLECTION: &str = "yazarlar";
pub const TAG_COLLECTION: &str = "etiketler";
pub const COMMENT_COLLECTION: &str = "yorumlar";
pub const SITE_SETTINGS_SINGLETON: &str = "site-ayarlari";
pub const THEME_SETTINGS_SINGLETON: &str = "tema-ayarlari";

/// CMS登录端点（本地凭据）
pub const AUTH_LOCAL_ENDPOINT: &str = "auth/local";
pub const AUTH_ME_ENDPOINT: &str = "users/me";
