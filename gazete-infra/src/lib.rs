pub mod cache;
pub mod cms;
pub mod theme;

pub use cache::{Cache, MokaCache};
pub use cms::HttpCmsClient;
pub use theme::{css_block, css_variables, hex_to_hsl, Hsl, ThemeState};
