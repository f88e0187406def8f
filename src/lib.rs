//! Grid element rendering for the bitmap display of a control surface
//!
//! Structure:
//! - `grid` - element model and the draw engine
//! - `gfx` - graphics backend port, recording and pixmap backends
//! - `resources` - icon ids, decoding and the shared icon cache
//! - `settings` - host settings facility
//! - `config` - config file and live display configuration
//! - `bank` - tracks and per-tick element snapshots
//! - `ui` - colors, themes, column layout and terminal preview
//! - `app` - state behind the `push-grid` command

pub mod app;
pub mod bank;
pub mod config;
pub mod gfx;
pub mod grid;
pub mod resources;
pub mod settings;
pub mod ui;
