/// Strapi风格查询参数构建器
///
/// 生成 filters[field][$op]=value / populate / sort / pagination 形式的
/// 有序键值对，由HTTP客户端负责URL编码。
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// filters[field][$op]=value
    pub fn filter(mut self, field: &str, op: &str, value: impl ToString) -> Self {
        self.pairs
            .push((format!("filters[{}][{}]", field, op), value.to_string()));
        self
    }

    /// filters[relation][field][$op]=value
    pub fn relation_filter(
        mut self,
        relation: &str,
        field: &str,
        op: &str,
        value: impl ToString,
    ) -> Self {
        self.pairs.push((
            format!("filters[{}][{}][{}]", relation, field, op),
            value.to_string(),
        ));
        self
    }

    /// filters[$or][index][field][$op]=value
    pub fn or_filter(mut self, index: usize, field: &str, op: &str, value: impl ToString) -> Self {
        self.pairs.push((
            format!("filters[$or][{}][{}][{}]", index, field, op),
            value.to_string(),
        ));
        self
    }

    pub fn sort(mut self, sort: &str) -> Self {
        self.pairs.push(("sort".to_string(), sort.to_string()));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.pairs
            .push(("pagination[page]".to_string(), page.to_string()));
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.pairs
            .push(("pagination[pageSize]".to_string(), size.to_string()));
        self
    }

    /// pagination[limit]：不分页，只取前N条
    pub fn limit(mut self, limit: u32) -> Self {
        self.pairs
            .push(("pagination[limit]".to_string(), limit.to_string()));
        self
    }

    /// fields[n]=name，裁剪返回字段
    pub fn field(mut self, index: usize, name: &str) -> Self {
        self.pairs.push((format!("fields[{}]", index), name.to_string()));
        self
    }

    /// populate=*等原样指令
    pub fn raw(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// 文章列表查询参数
///
/// 默认按发布时间倒序，始终只取已发布（durum=yayinda）的文章。
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub page: u32,
    pub page_size: u32,
    /// 分类slug过滤
    pub category: Option<String>,
    /// 作者slug过滤
    pub author: Option<String>,
    /// 标签slug过滤
    pub tag: Option<String>,
    /// 只取快讯（sondakika）
    pub breaking: bool,
    /// 只取头条（manset）
    pub featured: bool,
    /// 标题全文检索
    pub search: Option<String>,
    pub sort: String,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            category: None,
            author: None,
            tag: None,
            breaking: false,
            featured: false,
            search: None,
            sort: "yayin_tarihi:desc".to_string(),
        }
    }
}

impl ArticleQuery {
    /// 构建最终查询参数
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = QueryParams::new()
            .page(self.page)
            .page_size(self.page_size)
            .sort(&self.sort)
            .filter("durum", "$eq", "yayinda")
            // 卡片展示所需的关联字段
            .raw("populate[kapak_resmi][fields][0]", "url")
            .raw("populate[kapak_resmi][fields][1]", "alternativeText")
            .raw("populate[kapak_resmi][fields][2]", "width")
            .raw("populate[kapak_resmi][fields][3]", "height")
            .raw("populate[kategori][fields][0]", "isim")
            .raw("populate[kategori][fields][1]", "slug")
            .raw("populate[kategori][fields][2]", "renk")
            .raw("populate[yazar][fields][0]", "isim")
            .raw("populate[yazar][fields][1]", "slug")
            .raw("populate[yazar][populate][foto][fields][0]", "url");

        if let Some(ref category) = self.category {
            params = params.relation_filter("kategori", "slug", "$eq", category);
        }
        if let Some(ref author) = self.author {
            params = params.relation_filter("yazar", "slug", "$eq", author);
        }
        if let Some(ref tag) = self.tag {
            params = params.relation_filter("etiketler", "slug", "$eq", tag);
        }
        if self.breaking {
            params = params.filter("sondakika", "$eq", "true");
        }
        if self.featured {
            params = params.filter("manset", "$eq", "true");
        }
        if let Some(ref search) = self.search {
            params = params.or_filter(0, "baslik", "$containsi", search);
        }

        params.into_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_query_sorts_by_publish_date_desc() {
        let pairs = ArticleQuery::default().to_params();
        assert_eq!(value_of(&pairs, "sort"), Some("yayin_tarihi:desc"));
        assert_eq!(value_of(&pairs, "filters[durum][$eq]"), Some("yayinda"));
        assert_eq!(value_of(&pairs, "pagination[page]"), Some("1"));
        assert_eq!(value_of(&pairs, "pagination[pageSize]"), Some("10"));
    }

    #[test]
    fn test_breaking_filter() {
        let query = ArticleQuery {
            breaking: true,
            ..Default::default()
        };
        let pairs = query.to_params();
        assert_eq!(value_of(&pairs, "filters[sondakika][$eq]"), Some("true"));
        // 默认排序保持发布时间倒序
        assert_eq!(value_of(&pairs, "sort"), Some("yayin_tarihi:desc"));
    }

    #[test]
    fn test_relation_and_search_filters() {
        let query = ArticleQuery {
            category: Some("spor".to_string()),
            search: Some("secim".to_string()),
            ..Default::default()
        };
        let pairs = query.to_params();
        assert_eq!(
            value_of(&pairs, "filters[kategori][slug][$eq]"),
            Some("spor")
        );
        assert_eq!(
            value_of(&pairs, "filters[$or][0][baslik][$containsi]"),
            Some("secim")
        );
    }

    #[test]
    fn test_builder_emits_limit_and_fields() {
        let pairs = QueryParams::new()
            .limit(5)
            .field(0, "slug")
            .field(1, "updatedAt")
            .into_pairs();
        assert_eq!(value_of(&pairs, "pagination[limit]"), Some("5"));
        assert_eq!(value_of(&pairs, "fields[0]"), Some("slug"));
        assert_eq!(value_of(&pairs, "fields[1]"), Some("updatedAt"));
    }
}
