pub mod engine;
pub mod palette;

pub use engine::ThemeState;
pub use palette::{css_block, css_variables, hex_to_hsl, Hsl};
