use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CMS响应的顶层信封：{data, meta}
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<CmsNode>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl Envelope {
    /// 解析原始响应体，形状不符时返回None
    pub fn parse(value: Value) -> Option<Envelope> {
        serde_json::from_value(value).ok()
    }

    /// 展平data部分，返回(展平值, 分页信息)
    pub fn into_flat(self) -> (Value, Option<Pagination>) {
        let pagination = self.meta.and_then(|m| m.pagination);
        let flat = self.data.map(CmsNode::flatten).unwrap_or(Value::Null);
        (flat, pagination)
    }
}

/// 信封的meta部分
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// meta.pagination，字段名为CMS的驼峰形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
    #[serde(rename = "pageCount", default)]
    pub page_count: u32,
    #[serde(default)]
    pub total: u64,
}

/// CMS值的结构分类
///
/// 反序列化是全覆盖的：数组归为Collection，{id, attributes}对象归为
/// Record，其余一切（null、标量、普通对象）都是Leaf。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CmsNode {
    Collection(Vec<CmsNode>),
    Record(CmsRecord),
    Leaf(Value),
}

/// CMS记录：{id, attributes: {...}}
#[derive(Debug, Clone, Deserialize)]
pub struct CmsRecord {
    pub id: Value,
    pub attributes: Map<String, Value>,
}

impl CmsNode {
    /// 递归展平为消费端可直接使用的JSON
    ///
    /// Collection逐元素展平并保持顺序；Record把id与attributes合并为
    /// 平铺对象，其中带data包装的关联字段被递归解开；Leaf原样返回，
    /// 已展平的数据因此是不动点：flatten(flatten(x)) == flatten(x)。
    pub fn flatten(self) -> Value {
        match self {
            CmsNode::Collection(items) => {
                Value::Array(items.into_iter().map(CmsNode::flatten).collect())
            }
            CmsNode::Record(record) => record.flatten(),
            CmsNode::Leaf(value) => value,
        }
    }
}

impl CmsRecord {
    fn flatten(self) -> Value {
        let mut out = Map::with_capacity(self.attributes.len() + 1);
        out.insert("id".to_string(), self.id);
        for (key, value) in self.attributes {
            let value = match value {
                // 关联字段信封：取出data递归展平，丢弃meta等兄弟键
                Value::Object(mut object) if object.contains_key("data") => {
                    flatten_value(object.remove("data").unwrap_or(Value::Null))
                }
                other => other,
            };
            out.insert(key, value);
        }
        Value::Object(out)
    }
}

/// 任意JSON值的展平入口，永不报错
pub fn flatten_value(value: Value) -> Value {
    match serde_json::from_value::<CmsNode>(value) {
        Ok(node) => node.flatten(),
        Err(_) => Value::Null,
    }
}
