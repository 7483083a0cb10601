pub mod content;
pub mod settings;
pub mod theme;

pub use content::{
    Article, ArticleDraft, ArticleSlug, ArticleStatus, Author, Category, Comment, CommentRef,
    CommentStatus, CmsUser, Media, Tag,
};
pub use settings::{ModePalette, SiteSettings, ThemeSettings};
pub use theme::{ResolvedTheme, ThemeMode};
