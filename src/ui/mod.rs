//! UI module - colors, themes, column layout and the terminal preview
//!
//! Structure:
//! - `color.rs` - RGBA colors and hex parsing
//! - `theme.rs` - Color themes and presets
//! - `layout.rs` - Column layout and paging
//! - `draw.rs` - Display composition and preview frame
//! - `preview.rs` - Half-block pixmap widget

pub mod color;
pub mod draw;
pub mod layout;
pub mod preview;
pub mod theme;

pub use color::Rgba;
pub use draw::{draw_display, draw_preview, render_display};
pub use layout::DisplayLayout;
pub use theme::Theme;
