use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// CMS请求错误
#[derive(Debug, Error)]
pub enum CmsError {
    /// 传输层失败（网络、DNS等）
    #[error("transport error: {0}")]
    Transport(String),

    /// 请求超时，按传输失败处理
    #[error("request timed out")]
    Timeout,

    /// CMS返回的业务错误（校验、认证等），message可直接展示给用户
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 响应体无法解析为JSON
    #[error("decode error: {0}")]
    Decode(String),
}

/// CmsClient trait 定义与上游CMS的HTTP交互
///
/// 所有内容读取都是带查询参数的GET；写操作需要Bearer令牌，
/// token为None时使用配置的服务令牌（如果有）。
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// GET请求，返回原始JSON响应体
    async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
        token: Option<&str>,
    ) -> Result<Value, CmsError>;

    /// POST请求（写操作）
    async fn post_json(&self, path: &str, body: &Value, token: Option<&str>)
        -> Result<Value, CmsError>;

    /// PUT请求（写操作）
    async fn put_json(&self, path: &str, body: &Value, token: Option<&str>)
        -> Result<Value, CmsError>;

    /// DELETE请求（写操作）
    async fn delete_json(&self, path: &str, token: Option<&str>) -> Result<Value, CmsError>;
}
