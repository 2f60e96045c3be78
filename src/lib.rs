// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewPane)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! Markdown authoring helpers for a portfolio/blog admin screen.
//!
//! Folio provides:
//! - A markdown toolbar engine with selection-aware edits
//! - Live preview rendered with comrak, refreshed only while visible
//! - A record-store interface for the blog and portfolio lists
//!
//! ## Architecture
//!
//! The host side uses The Elm Architecture (TEA) pattern:
//! - **Model**: mounted text surfaces, toolbars and preview panes
//! - **Message**: clicks, input, selection changes and toggles
//! - **Update**: state transitions routed through the toolbar engine
//!
//! ## Modules
//!
//! - [`toolbar`]: Actions, the action table and the edit primitives
//! - [`surface`]: The `TextSurface` / `PreviewSink` capabilities
//! - [`editor`]: Rope-backed text surface
//! - [`preview`]: Markdown rendering, preview refresh and live file preview
//! - [`app`]: Workbench model and update loop
//! - [`content`]: Records, the record store and excerpts
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod content;
pub mod editor;
pub mod preview;
pub mod surface;
pub mod toolbar;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{Message, Model, update};
    pub use crate::editor::EditorBuffer;
    pub use crate::preview::{ComrakRenderer, PreviewPane, Renderer};
    pub use crate::surface::{PreviewSink, Selection, TextSurface};
    pub use crate::toolbar::{Action, Transform, dispatch};
}
