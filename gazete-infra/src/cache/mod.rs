use async_trait::async_trait;
use std::time::Duration;

/// Cache trait 定义缓存操作
///
/// 值统一为序列化后的字符串，由调用方负责编解码。
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn invalidate(&self, key: &str);
}

/// MokaCache 进程内TTL缓存
///
/// 站点/主题设置这类每页都要的单例走这里，TTL在构造时统一指定。
pub struct MokaCache {
    inner: moka::future::Cache<String, String>,
}

impl MokaCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = moka::future::Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl Cache for MokaCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) {
        self.inner.insert(key.to_string(), value).await;
    }

    async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}
