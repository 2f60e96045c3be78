//! The markdown workbench host.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: every mounted surface, toolbar and preview pane
//! - [`Message`]: click, input, selection and toggle events
//! - [`update`]: state transitions, routed through the toolbar engine

mod model;
mod update;

pub use model::{ADMIN_MARKDOWN_FIELDS, Model, Toolbar};
pub use update::{Message, update};

#[cfg(test)]
mod tests;
