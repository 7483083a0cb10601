use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// tera模板glob
    pub templates_glob: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            templates_glob: "templates/**/*.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// CMS根地址（不含/api）
    pub url: String,
    /// 只读服务令牌，可选
    pub api_token: Option<String>,
    /// 请求超时上限，超时按传输失败处理
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:1337".to_string(),
            api_token: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 站点对外基地址（feed/sitemap里的绝对URL）
    pub url: String,
    pub name: String,
    pub description: String,
    pub language: String,
    /// light | dark | system，CMS主题设置缺席时的默认
    pub default_theme: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            name: "Haber Sitesi".to_string(),
            description: "Türkiye ve dünyadan son dakika haberler".to_string(),
            language: "tr".to_string(),
            default_theme: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub max_capacity: u64,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 64,
            ttl_secs: 300,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // 如果存在.env文件，加载它
        let _ = dotenv::dotenv();

        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name("gazete.toml").required(false))
            .add_source(config::Environment::with_prefix("GAZETE").separator("__"));

        let config = builder.build()?;
        config.try_deserialize()
    }
}
