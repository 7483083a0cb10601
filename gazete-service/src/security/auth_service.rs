use async_trait::async_trait;
use gazete_api::cms::CmsClient;
use gazete_domain::content::constant;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// 登录成功后CMS签发的会话：JWT + 用户信息
///
/// 令牌在浏览器会话内以Cookie形式持有，不做刷新或轮换。
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSession {
    pub jwt: String,
    pub user: AdminUser,
}

/// CMS管理用户
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 管理端认证服务trait
///
/// 凭据校验完全由CMS完成（POST auth/local），这里只换取并透传JWT。
#[async_trait]
pub trait AuthService: Send + Sync {
    /// 登录，失败时错误信息可直接展示
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AdminSession, Box<dyn std::error::Error + Send + Sync>>;

    /// 用令牌取当前用户；令牌失效返回None
    async fn current_user(&self, token: &str) -> Option<AdminUser>;
}

/// 默认认证服务实现
pub struct DefaultAuthService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultAuthService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: CmsClient> AuthService for DefaultAuthService<C> {
    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AdminSession, Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({ "identifier": identifier, "password": password });
        let response = self
            .client
            .post_json(constant::AUTH_LOCAL_ENDPOINT, &body, None)
            .await?;
        let session = serde_json::from_value(response)?;
        Ok(session)
    }

    async fn current_user(&self, token: &str) -> Option<AdminUser> {
        match self
            .client
            .get_json(constant::AUTH_ME_ENDPOINT, &[], Some(token))
            .await
        {
            // users/me不走信封，直接是用户对象
            Ok(body) => serde_json::from_value(body).ok(),
            Err(e) => {
                warn!(error = %e, "session token rejected");
                None
            }
        }
    }
}
