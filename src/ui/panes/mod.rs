//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the error line
//! - [`tokens`]: The scanner's token stream and its diagnostics
//! - [`tree`]: Outline of the syntax tree, or the parse error
//! - [`output`]: Pretty-printed source or generated C
//! - [`status`]: Status bar with keybindings and parse state
//! - `utils`: Shared helpers for borders and scrolling
//!
//! # Architecture
//!
//! Each pane module exports a primary `render_*` function. Panes are
//! stateless apart from the scroll offset they clamp in place.

mod utils;

pub mod output;
pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use output::render_output_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;
