use async_trait::async_trait;
use gazete_api::cms::{CmsClient, CmsError};
use serde_json::Value;
use std::time::Duration;

/// reqwest实现的CMS客户端
///
/// base_url指向CMS根地址（不含/api），所有请求走 {base}/api/{path}。
/// 配置的服务令牌在调用方未提供令牌时兜底。
pub struct HttpCmsClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpCmsClient {
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CmsError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn bearer<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token.or(self.api_token.as_deref())
    }

    async fn decode(response: reqwest::Response) -> Result<Value, CmsError> {
        let status = response.status();
        let body = response.json::<Value>().await;
        if status.is_success() {
            return body.map_err(|e| CmsError::Decode(e.to_string()));
        }
        // 失败响应优先取CMS包体里的error.message
        let message = body
            .ok()
            .as_ref()
            .and_then(|b| b.pointer("/error/message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(CmsError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, CmsError> {
        let response = request.send().await.map_err(map_transport_error)?;
        Self::decode(response).await
    }
}

fn map_transport_error(e: reqwest::Error) -> CmsError {
    if e.is_timeout() {
        CmsError::Timeout
    } else {
        CmsError::Transport(e.to_string())
    }
}

#[async_trait]
impl CmsClient for HttpCmsClient {
    async fn get_json(
        &self,
        path: &str,
        query: &[(String, String)],
        token: Option<&str>,
    ) -> Result<Value, CmsError> {
        let mut request = self.http.get(self.url(path)).query(query);
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Result<Value, CmsError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    async fn put_json(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Result<Value, CmsError> {
        let mut request = self.http.put(self.url(path)).json(body);
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    async fn delete_json(&self, path: &str, token: Option<&str>) -> Result<Value, CmsError> {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = self.bearer(token) {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_get_json_passes_query_and_bearer() {
        let router = Router::new().route(
            "/api/haberler",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Json(json!({ "data": [], "echo": params.get("sort"), "auth": auth }))
                },
            ),
        );
        let base = serve(router).await;

        let client =
            HttpCmsClient::new(&base, Some("servis".to_string()), Duration::from_secs(2)).unwrap();
        let body = client
            .get_json(
                "haberler",
                &[("sort".to_string(), "yayin_tarihi:desc".to_string())],
                None,
            )
            .await
            .unwrap();
        assert_eq!(body["echo"], json!("yayin_tarihi:desc"));
        assert_eq!(body["auth"], json!("Bearer servis"));
    }

    #[tokio::test]
    async fn test_explicit_token_overrides_service_token() {
        let router = Router::new().route(
            "/api/yorumlar",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "auth": auth }))
            }),
        );
        let base = serve(router).await;

        let client =
            HttpCmsClient::new(&base, Some("servis".to_string()), Duration::from_secs(2)).unwrap();
        let body = client.get_json("yorumlar", &[], Some("editor-jwt")).await.unwrap();
        assert_eq!(body["auth"], json!("Bearer editor-jwt"));
    }

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let router = Router::new().route(
            "/api/haberler",
            get(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(json!({ "error": { "message": "slug zorunlu" } })),
                )
            }),
        );
        let base = serve(router).await;

        let client = HttpCmsClient::new(&base, None, Duration::from_secs(2)).unwrap();
        let err = client.get_json("haberler", &[], None).await.unwrap_err();
        match err {
            CmsError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "slug zorunlu");
            }
            other => panic!("beklenmeyen hata: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let router = Router::new().route("/api/haberler", get(|| async { "bu json degil" }));
        let base = serve(router).await;

        let client = HttpCmsClient::new(&base, None, Duration::from_secs(2)).unwrap();
        let err = client.get_json("haberler", &[], None).await.unwrap_err();
        assert!(matches!(err, CmsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // 绑定后立即释放的端口，连接必然被拒绝
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpCmsClient::new(
            &format!("http://{}", addr),
            None,
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.get_json("haberler", &[], None).await.unwrap_err();
        assert!(matches!(err, CmsError::Transport(_) | CmsError::Timeout));
    }
}
