//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with scanner-driven syntax highlighting
//! - [`tree`]: Flattened rule tree with the selected row
//! - [`preview`]: The selected top-level rule, re-rendered as CSS
//! - [`properties`]: Property usage counts
//! - [`status`]: Status bar with keybindings and position
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! state; scroll offsets are passed in mutably and clamped while rendering.

pub mod preview;
pub mod properties;
pub mod source;
pub mod status;
pub mod tree;

pub use preview::render_preview_pane;
pub use properties::{count_properties, render_properties_pane};
pub use source::{highlight_source_line, render_source_pane};
pub use status::render_status_bar;
pub use tree::{flatten_stylesheet, render_tree_pane, TreeRow, TreeRowKind};
