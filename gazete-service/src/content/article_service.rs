use super::{decode_item, decode_items};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use gazete_api::cms::{ArticleQuery, CmsClient, Envelope, Pagination, QueryParams};
use gazete_domain::content::constant;
use gazete_domain::content::{Article, ArticleDraft, ArticleSlug};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, warn};

/// 文章列表结果，读失败时降级为空
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleList {
    pub items: Vec<Article>,
    pub pagination: Option<Pagination>,
}

/// Article服务trait
///
/// 读操作永不向调用方抛错：传输或解析失败都降级为空结果并记日志。
/// 管理端写操作返回Result，错误信息可直接展示给编辑。
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// 列出已发布文章
    async fn list(&self, query: ArticleQuery) -> ArticleList;

    /// 按slug取单篇已发布文章
    async fn get_by_slug(&self, slug: &str) -> Option<Article>;

    /// 头条，按manset_sira升序
    async fn featured(&self, limit: u32) -> Vec<Article>;

    /// 快讯，按发布时间倒序
    async fn breaking(&self, limit: u32) -> Vec<Article>;

    /// 同分类相关文章，排除当前slug
    async fn related(&self, slug: &str, category_slug: &str, limit: u32) -> Vec<Article>;

    /// Google News sitemap数据：最近48小时的文章
    async fn recent_news(&self, now: DateTime<Utc>) -> Vec<Article>;

    /// 全量slug（通用sitemap）
    async fn slugs(&self) -> Vec<ArticleSlug>;

    /// 阅读计数：读取-加一-写回
    ///
    /// 没有并发保护，同时到达的读者可能互相覆盖丢一次计数；
    /// 计数属于遥测而非业务数据，失败静默。
    async fn increment_read_count(&self, id: i64);

    /// 管理端列表（含草稿），需要编辑令牌
    async fn admin_list(
        &self,
        page: u32,
        token: &str,
    ) -> Result<ArticleList, Box<dyn std::error::Error + Send + Sync>>;

    /// 管理端取单篇（任意状态）
    async fn admin_get(
        &self,
        id: i64,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>>;

    /// 创建文章
    async fn create(
        &self,
        draft: ArticleDraft,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>>;

    /// 更新文章
    async fn update(
        &self,
        id: i64,
        draft: ArticleDraft,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>>;

    /// 删除文章
    async fn delete(
        &self,
        id: i64,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// 默认Article服务实现
pub struct DefaultArticleService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultArticleService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// 读路径公共部分：请求-解信封-展平；失败记日志返回None
    async fn fetch_flat(
        &self,
        params: &[(String, String)],
    ) -> Option<(Value, Option<Pagination>)> {
        match self
            .client
            .get_json(constant::ARTICLE_COLLECTION, params, None)
            .await
        {
            Ok(body) => Envelope::parse(body).map(Envelope::into_flat),
            Err(e) => {
                error!(error = %e, "article fetch failed");
                None
            }
        }
    }

    /// 卡片/列表通用的封面与分类populate
    fn card_populate(params: QueryParams) -> QueryParams {
        params
            .raw("populate[kapak_resmi][fields][0]", "url")
            .raw("populate[kategori][fields][0]", "isim")
            .raw("populate[kategori][fields][1]", "slug")
            .raw("populate[kategori][fields][2]", "renk")
    }

    /// 信封里的单条记录解码为Article
    fn record_from(body: Value) -> Result<Article, Box<dyn std::error::Error + Send + Sync>> {
        let envelope = Envelope::parse(body).ok_or("unexpected CMS response shape")?;
        let (flat, _) = envelope.into_flat();
        let article = serde_json::from_value(flat)?;
        Ok(article)
    }
}

#[async_trait]
impl<C: CmsClient> ArticleService for DefaultArticleService<C> {
    async fn list(&self, query: ArticleQuery) -> ArticleList {
        let params = query.to_params();
        match self.fetch_flat(&params).await {
            Some((flat, pagination)) => ArticleList {
                items: decode_items(flat, constant::ARTICLE_COLLECTION),
                pagination,
            },
            None => ArticleList::default(),
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Option<Article> {
        let params = QueryParams::new()
            .filter("slug", "$eq", slug)
            .filter("durum", "$eq", "yayinda")
            .raw("populate", "*")
            .into_pairs();
        let (flat, _) = self.fetch_flat(&params).await?;
        // 单项查询走的是列表端点，取首元素
        let first = match flat {
            Value::Array(mut items) if !items.is_empty() => items.remove(0),
            _ => return None,
        };
        decode_item(first, constant::ARTICLE_COLLECTION)
    }

    async fn featured(&self, limit: u32) -> Vec<Article> {
        let params = Self::card_populate(
            QueryParams::new()
                .filter("manset", "$eq", "true")
                .filter("durum", "$eq", "yayinda")
                .sort("manset_sira:asc")
                .limit(limit),
        )
        .into_pairs();
        match self.fetch_flat(&params).await {
            Some((flat, _)) => decode_items(flat, constant::ARTICLE_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn breaking(&self, limit: u32) -> Vec<Article> {
        let params = Self::card_populate(
            QueryParams::new()
                .filter("sondakika", "$eq", "true")
                .filter("durum", "$eq", "yayinda")
                .sort("yayin_tarihi:desc")
                .limit(limit),
        )
        .into_pairs();
        match self.fetch_flat(&params).await {
            Some((flat, _)) => decode_items(flat, constant::ARTICLE_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn related(&self, slug: &str, category_slug: &str, limit: u32) -> Vec<Article> {
        let params = Self::card_populate(
            QueryParams::new()
                .filter("slug", "$ne", slug)
                .relation_filter("kategori", "slug", "$eq", category_slug)
                .filter("durum", "$eq", "yayinda")
                .sort("yayin_tarihi:desc")
                .limit(limit),
        )
        .into_pairs();
        match self.fetch_flat(&params).await {
            Some((flat, _)) => decode_items(flat, constant::ARTICLE_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn recent_news(&self, now: DateTime<Utc>) -> Vec<Article> {
        let two_days_ago = now - Duration::hours(48);
        let params = QueryParams::new()
            .filter("durum", "$eq", "yayinda")
            .filter(
                "yayin_tarihi",
                "$gte",
                two_days_ago.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .sort("yayin_tarihi:desc")
            .limit(1000)
            .raw("populate[kategori][fields][0]", "isim")
            .raw("populate[kapak_resmi][fields][0]", "url")
            .into_pairs();
        match self.fetch_flat(&params).await {
            Some((flat, _)) => decode_items(flat, constant::ARTICLE_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn slugs(&self) -> Vec<ArticleSlug> {
        let params = QueryParams::new()
            .filter("durum", "$eq", "yayinda")
            .field(0, "slug")
            .field(1, "updatedAt")
            .limit(10000)
            .into_pairs();
        match self.fetch_flat(&params).await {
            Some((flat, _)) => decode_items(flat, constant::ARTICLE_COLLECTION),
            None => Vec::new(),
        }
    }

    async fn increment_read_count(&self, id: i64) {
        let path = format!("{}/{}", constant::ARTICLE_COLLECTION, id);
        let params = QueryParams::new().field(0, "okunma_sayisi").into_pairs();
        let current = match self.client.get_json(&path, &params, None).await {
            Ok(body) => body
                .pointer("/data/attributes/okunma_sayisi")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            Err(e) => {
                warn!(error = %e, article = id, "read count fetch failed");
                return;
            }
        };
        let body = json!({ "data": { "okunma_sayisi": current + 1 } });
        if let Err(e) = self.client.put_json(&path, &body, None).await {
            warn!(error = %e, article = id, "read count update failed");
        }
    }

    async fn admin_list(
        &self,
        page: u32,
        token: &str,
    ) -> Result<ArticleList, Box<dyn std::error::Error + Send + Sync>> {
        let params = QueryParams::new()
            .page(page)
            .page_size(20)
            .sort("createdAt:desc")
            .raw("populate[kategori][fields][0]", "isim")
            .into_pairs();
        let body = self
            .client
            .get_json(constant::ARTICLE_COLLECTION, &params, Some(token))
            .await?;
        let envelope = Envelope::parse(body).ok_or("unexpected CMS response shape")?;
        let (flat, pagination) = envelope.into_flat();
        Ok(ArticleList {
            items: decode_items(flat, constant::ARTICLE_COLLECTION),
            pagination,
        })
    }

    async fn admin_get(
        &self,
        id: i64,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::ARTICLE_COLLECTION, id);
        let params = QueryParams::new().raw("populate", "*").into_pairs();
        let body = self.client.get_json(&path, &params, Some(token)).await?;
        Self::record_from(body)
    }

    async fn create(
        &self,
        draft: ArticleDraft,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({ "data": draft });
        let response = self
            .client
            .post_json(constant::ARTICLE_COLLECTION, &body, Some(token))
            .await?;
        Self::record_from(response)
    }

    async fn update(
        &self,
        id: i64,
        draft: ArticleDraft,
        token: &str,
    ) -> Result<Article, Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::ARTICLE_COLLECTION, id);
        let body = json!({ "data": draft });
        let response = self.client.put_json(&path, &body, Some(token)).await?;
        Self::record_from(response)
    }

    async fn delete(
        &self,
        id: i64,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::ARTICLE_COLLECTION, id);
        self.client.delete_json(&path, Some(token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazete_api::cms::CmsError;
    use std::sync::Mutex;

    /// 固定响应的测试客户端，记录收到的写请求
    struct StubClient {
        get_body: Option<Value>,
        puts: Mutex<Vec<(String, Value)>>,
    }

    impl StubClient {
        fn ok(body: Value) -> Self {
            Self {
                get_body: Some(body),
                puts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                get_body: None,
                puts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CmsClient for StubClient {
        async fn get_json(
            &self,
            _path: &str,
            _query: &[(String, String)],
            _token: Option<&str>,
        ) -> Result<Value, CmsError> {
            match &self.get_body {
                Some(body) => Ok(body.clone()),
                None => Err(CmsError::Transport("connection refused".to_string())),
            }
        }

        async fn post_json(
            &self,
            _path: &str,
            _body: &Value,
            _token: Option<&str>,
        ) -> Result<Value, CmsError> {
            Err(CmsError::Transport("not under test".to_string()))
        }

        async fn put_json(
            &self,
            path: &str,
            body: &Value,
            _token: Option<&str>,
        ) -> Result<Value, CmsError> {
            self.puts
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            Ok(json!({ "data": null }))
        }

        async fn delete_json(&self, _path: &str, _token: Option<&str>) -> Result<Value, CmsError> {
            Ok(json!({ "data": null }))
        }
    }

    fn service(client: StubClient) -> DefaultArticleService<StubClient> {
        DefaultArticleService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_list_maps_envelope() {
        let body = json!({
            "data": [
                { "id": 1, "attributes": { "baslik": "Bir", "slug": "bir", "sondakika": true } },
                { "id": 2, "attributes": { "baslik": "Iki", "slug": "iki" } }
            ],
            "meta": { "pagination": { "page": 1, "pageSize": 10, "pageCount": 1, "total": 2 } }
        });
        let list = service(StubClient::ok(body))
            .list(ArticleQuery::default())
            .await;
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].title, "Bir");
        assert!(list.items[0].breaking);
        assert_eq!(list.pagination.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_list_degrades_to_empty_on_transport_failure() {
        let list = service(StubClient::failing())
            .list(ArticleQuery::default())
            .await;
        assert!(list.items.is_empty());
        assert!(list.pagination.is_none());
    }

    #[tokio::test]
    async fn test_bad_record_is_skipped_not_fatal() {
        // baslik类型错误的记录被跳过，其余正常返回
        let body = json!({
            "data": [
                { "id": 1, "attributes": { "baslik": 123 } },
                { "id": 2, "attributes": { "baslik": "Saglam", "slug": "saglam" } }
            ]
        });
        let list = service(StubClient::ok(body))
            .list(ArticleQuery::default())
            .await;
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].title, "Saglam");
    }

    #[tokio::test]
    async fn test_get_by_slug_takes_first_match() {
        let body = json!({
            "data": [ { "id": 7, "attributes": { "baslik": "Tek", "slug": "tek" } } ]
        });
        let article = service(StubClient::ok(body)).get_by_slug("tek").await;
        assert_eq!(article.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_get_by_slug_empty_is_none() {
        let body = json!({ "data": [] });
        assert!(service(StubClient::ok(body)).get_by_slug("yok").await.is_none());
    }

    #[tokio::test]
    async fn test_increment_read_count_lost_update_race() {
        // 两次递增都读到同一个旧值5：最终写回的是6而不是7。
        // 这记录的是已接受的last-writer-wins竞态，不是断言N+2。
        let body = json!({ "data": { "id": 1, "attributes": { "okunma_sayisi": 5 } } });
        let service = service(StubClient::ok(body));
        service.increment_read_count(1).await;
        service.increment_read_count(1).await;

        let puts = service.client.puts.lock().unwrap();
        assert_eq!(puts.len(), 2);
        for (path, body) in puts.iter() {
            assert_eq!(path, "haberler/1");
            assert_eq!(body["data"]["okunma_sayisi"], json!(6));
        }
    }

    #[tokio::test]
    async fn test_increment_read_count_swallows_failure() {
        // 传输失败时不panic、不写回
        let service = service(StubClient::failing());
        service.increment_read_count(1).await;
        assert!(service.client.puts.lock().unwrap().is_empty());
    }
}
