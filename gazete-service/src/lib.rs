pub mod content;
pub mod feed;
pub mod security;
pub mod settings;

pub use content::{
    build_comment_tree, to_amp_html, ArticleList, ArticleService, AuthorService, CategoryService,
    CommentNode, CommentService, DefaultArticleService, DefaultAuthorService,
    DefaultCategoryService, DefaultCommentService, DefaultTagService, NewComment, TagService,
    MAX_REPLY_DEPTH,
};
pub use feed::{escape_xml, render_news_sitemap, render_rss, render_sitemap, FeedContext};
pub use security::{AdminSession, AdminUser, AuthService, DefaultAuthService};
pub use settings::{DefaultSettingsService, SettingsService};
