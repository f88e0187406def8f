//! Grid element rendering engine
//!
//! Structure:
//! - `units.rs` - unit-based metrics
//! - `channel_type.rs` - channel types and the icon registry
//! - `element.rs` - element model, menu header, shared text rule
//! - `channel_selection.rs` - channel selection cell
//! - `ports.rs` - theme and configuration interfaces

mod channel_selection;
mod channel_type;
mod element;
mod ports;
mod units;


pub use channel_selection::ChannelSelectionGridElement;
pub use channel_type::{ChannelType, IconRegistry};
pub use element::{draw_menu, draw_text_in_bounds, ElementState, GridElement, MenuGridElement};
pub use ports::{Configuration, LayoutTheme, RenderEnv};
pub use units::Units;
