use super::{decode_item, decode_items};
use async_trait::async_trait;
use gazete_api::cms::{CmsClient, Envelope, QueryParams};
use gazete_domain::content::{constant, Comment, CommentStatus};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

/// 回复嵌套深度上限（顶层为0）
pub const MAX_REPLY_DEPTH: usize = 2;

/// 访客评论提交载荷
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    /// 所属文章id
    pub haber: i64,
    /// 父评论id（回复时）
    pub parent_yorum: Option<i64>,
    #[validate(length(min = 2, max = 2000, message = "Yorum 2-2000 karakter olmali"))]
    pub icerik: String,
    #[validate(length(min = 2, max = 60, message = "Adinizi girin"))]
    pub misafir_adi: String,
    #[validate(email(message = "Gecerli bir e-posta girin"))]
    pub misafir_email: String,
}

/// 评论树节点
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(rename = "cevaplar")]
    pub replies: Vec<CommentNode>,
}

/// 把平铺的已审核评论装配成树
///
/// 输入按createdAt升序，父评论先于回复出现。父引用不在集合内的
/// 回复上提为顶层；嵌套深度超过MAX_REPLY_DEPTH的回复钳到
/// 达到上限的那层祖先之下，渲染深度因此有界。
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let mut depths: HashMap<i64, usize> = HashMap::new();
    let mut effective_parents: HashMap<i64, Option<i64>> = HashMap::new();

    for comment in &comments {
        let requested = comment.parent.map(|p| p.id);
        let effective = match requested {
            Some(parent_id) if depths.contains_key(&parent_id) => {
                if depths[&parent_id] + 1 > MAX_REPLY_DEPTH {
                    // 向上走到深度MAX-1的祖先，回复挂在它下面
                    let mut anchor = parent_id;
                    while depths[&anchor] > MAX_REPLY_DEPTH - 1 {
                        match effective_parents.get(&anchor).copied().flatten() {
                            Some(up) => anchor = up,
                            None => break,
                        }
                    }
                    Some(anchor)
                } else {
                    Some(parent_id)
                }
            }
            // 孤儿回复（父评论未审核或属于别的查询）上提为顶层
            _ => None,
        };
        let depth = effective.map(|id| depths[&id] + 1).unwrap_or(0);
        depths.insert(comment.id, depth);
        effective_parents.insert(comment.id, effective);
    }

    let mut children: HashMap<i64, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();
    for comment in comments {
        match effective_parents.get(&comment.id).copied().flatten() {
            Some(parent_id) => children.entry(parent_id).or_default().push(comment),
            None => roots.push(comment),
        }
    }

    fn attach(comment: Comment, children: &mut HashMap<i64, Vec<Comment>>) -> CommentNode {
        let kids = children.remove(&comment.id).unwrap_or_default();
        CommentNode {
            replies: kids.into_iter().map(|c| attach(c, children)).collect(),
            comment,
        }
    }

    roots
        .into_iter()
        .map(|comment| attach(comment, &mut children))
        .collect()
}

/// Yorum服务trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// 某文章的已审核评论，createdAt升序（平铺，树由build_comment_tree装配）
    async fn list_for_article(&self, article_id: i64) -> Vec<Comment>;

    /// 提交访客评论，状态固定为beklemede等待审核
    async fn submit(
        &self,
        new: NewComment,
    ) -> Result<Comment, Box<dyn std::error::Error + Send + Sync>>;

    /// 点赞：读-改-写，乐观且不重试
    async fn like(&self, comment_id: i64) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// 管理端：按状态列出（含所属文章与用户）
    async fn admin_list(
        &self,
        status: CommentStatus,
        token: &str,
    ) -> Result<Vec<Comment>, Box<dyn std::error::Error + Send + Sync>>;

    /// 管理端：修改评论状态（审核/驳回）
    async fn set_status(
        &self,
        id: i64,
        status: CommentStatus,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// 管理端：删除评论
    async fn delete(
        &self,
        id: i64,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// 默认Yorum服务实现
pub struct DefaultCommentService<C: CmsClient> {
    client: Arc<C>,
}

impl<C: CmsClient> DefaultCommentService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: CmsClient> CommentService for DefaultCommentService<C> {
    async fn list_for_article(&self, article_id: i64) -> Vec<Comment> {
        let params = QueryParams::new()
            .relation_filter("haber", "id", "$eq", article_id)
            .filter("durum", "$eq", "onaylandi")
            .sort("createdAt:asc")
            .raw("populate[kullanici][fields][0]", "username")
            .raw("populate[parent_yorum][fields][0]", "id")
            .limit(500)
            .into_pairs();
        match self
            .client
            .get_json(constant::COMMENT_COLLECTION, &params, None)
            .await
        {
            Ok(body) => match Envelope::parse(body) {
                Some(envelope) => decode_items(envelope.into_flat().0, constant::COMMENT_COLLECTION),
                None => Vec::new(),
            },
            Err(e) => {
                error!(error = %e, article = article_id, "comment fetch failed");
                Vec::new()
            }
        }
    }

    async fn submit(
        &self,
        new: NewComment,
    ) -> Result<Comment, Box<dyn std::error::Error + Send + Sync>> {
        new.validate()?;
        let body = json!({
            "data": {
                "haber": new.haber,
                "parent_yorum": new.parent_yorum,
                "icerik": new.icerik,
                "misafir_adi": new.misafir_adi,
                "misafir_email": new.misafir_email,
                "durum": CommentStatus::Pending.as_wire(),
            }
        });
        let response = self
            .client
            .post_json(constant::COMMENT_COLLECTION, &body, None)
            .await?;
        let envelope = Envelope::parse(response).ok_or("unexpected CMS response shape")?;
        decode_item(envelope.into_flat().0, constant::COMMENT_COLLECTION)
            .ok_or_else(|| "comment response failed to decode".into())
    }

    async fn like(&self, comment_id: i64) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::COMMENT_COLLECTION, comment_id);
        let params = QueryParams::new().field(0, "begeni_sayisi").into_pairs();
        let current = self
            .client
            .get_json(&path, &params, None)
            .await?
            .pointer("/data/attributes/begeni_sayisi")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let body = json!({ "data": { "begeni_sayisi": current + 1 } });
        self.client.put_json(&path, &body, None).await?;
        Ok(())
    }

    async fn admin_list(
        &self,
        status: CommentStatus,
        token: &str,
    ) -> Result<Vec<Comment>, Box<dyn std::error::Error + Send + Sync>> {
        let params = QueryParams::new()
            .filter("durum", "$eq", status.as_wire())
            .sort("createdAt:desc")
            .raw("populate", "haber,kullanici")
            .into_pairs();
        let body = self
            .client
            .get_json(constant::COMMENT_COLLECTION, &params, Some(token))
            .await?;
        let envelope = Envelope::parse(body).ok_or("unexpected CMS response shape")?;
        Ok(decode_items(
            envelope.into_flat().0,
            constant::COMMENT_COLLECTION,
        ))
    }

    async fn set_status(
        &self,
        id: i64,
        status: CommentStatus,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::COMMENT_COLLECTION, id);
        let body = json!({ "data": { "durum": status.as_wire() } });
        self.client.put_json(&path, &body, Some(token)).await?;
        Ok(())
    }

    async fn delete(
        &self,
        id: i64,
        token: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = format!("{}/{}", constant::COMMENT_COLLECTION, id);
        self.client.delete_json(&path, Some(token)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazete_domain::content::CommentRef;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id,
            content: format!("yorum {}", id),
            parent: parent.map(|id| CommentRef { id }),
            ..Default::default()
        }
    }

    #[test]
    fn test_tree_basic_nesting() {
        let tree = build_comment_tree(vec![
            comment(1, None),
            comment(2, None),
            comment(3, Some(1)),
            comment(4, Some(3)),
        ]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].comment.id, 1);
        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].comment.id, 3);
        assert_eq!(tree[0].replies[0].replies[0].comment.id, 4);
        assert!(tree[1].replies.is_empty());
    }

    #[test]
    fn test_tree_orphan_reply_becomes_top_level() {
        // 99号父评论不在已审核集合里
        let tree = build_comment_tree(vec![comment(1, None), comment(2, Some(99))]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].comment.id, 2);
    }

    #[test]
    fn test_tree_depth_is_clamped() {
        // 1 <- 2 <- 3 已到上限，4想回复3，被钳到3的父层级之下
        let tree = build_comment_tree(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(2)),
            comment(4, Some(3)),
        ]);
        assert_eq!(tree.len(), 1);
        let level1 = &tree[0].replies[0];
        assert_eq!(level1.comment.id, 2);
        let ids: Vec<i64> = level1.replies.iter().map(|n| n.comment.id).collect();
        // 3和4都在深度2，不再往下嵌套
        assert_eq!(ids, vec![3, 4]);
        for node in &level1.replies {
            assert!(node.replies.is_empty());
        }
    }

    #[test]
    fn test_tree_preserves_input_order() {
        let tree = build_comment_tree(vec![
            comment(5, None),
            comment(6, None),
            comment(7, Some(5)),
            comment(8, Some(5)),
        ]);
        assert_eq!(tree[0].comment.id, 5);
        let ids: Vec<i64> = tree[0].replies.iter().map(|n| n.comment.id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_new_comment_validation() {
        let bad = NewComment {
            haber: 1,
            parent_yorum: None,
            icerik: "x".to_string(),
            misafir_adi: "Ali".to_string(),
            misafir_email: "bu-eposta-degil".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("icerik"));
        assert!(errors.field_errors().contains_key("misafir_email"));

        let good = NewComment {
            haber: 1,
            parent_yorum: Some(2),
            icerik: "Gayet makul bir yorum".to_string(),
            misafir_adi: "Ali".to_string(),
            misafir_email: "ali@example.com".to_string(),
        };
        assert!(good.validate().is_ok());
    }
}
