pub mod app_state;
pub mod extractors;
pub mod handlers;

pub use app_state::{AppState, SiteMeta};
pub use extractors::{AdminAuth, ThemeContext, ADMIN_JWT_COOKIE, THEME_COOKIE};
pub use handlers::*;
