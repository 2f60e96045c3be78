//! Lightweight editor buffer for markdown form fields.
//!
//! Provides a rope-backed text buffer with a selection range that the
//! toolbar engine edits through [`crate::surface::TextSurface`].

mod buffer;

pub use buffer::EditorBuffer;
