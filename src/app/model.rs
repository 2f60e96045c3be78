use std::collections::HashMap;

use crate::editor::EditorBuffer;
use crate::preview::{ComrakRenderer, PreviewPane, Renderer};
use crate::toolbar::Action;

/// Markdown fields on the admin screen, in page order.
pub const ADMIN_MARKDOWN_FIELDS: [&str; 3] =
    ["blog-content", "portfolio-description", "jikatar-content"];

/// A toolbar bound to one target surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub target: String,
}

impl Toolbar {
    /// `(tag, label)` for every button, in display order.
    pub fn buttons() -> impl Iterator<Item = (&'static str, &'static str)> {
        Action::ALL
            .into_iter()
            .map(|action| (action.tag(), action.label()))
    }
}

/// The complete workbench state.
///
/// Surfaces, previews and toolbars are looked up by id on every message;
/// nothing holds a reference across messages.
pub struct Model {
    /// Editable markdown fields keyed by id
    pub surfaces: HashMap<String, EditorBuffer>,
    /// Preview panes keyed by the id of the surface they preview
    pub previews: HashMap<String, PreviewPane>,
    /// Toolbars in mount order; messages address them by index
    pub toolbars: Vec<Toolbar>,
    pub(super) renderer: Box<dyn Renderer>,
}

impl Model {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            surfaces: HashMap::new(),
            previews: HashMap::new(),
            toolbars: Vec::new(),
            renderer,
        }
    }

    /// The admin screen: every markdown field gets a toolbar and a hidden
    /// preview.
    pub fn admin(renderer: ComrakRenderer) -> Self {
        ADMIN_MARKDOWN_FIELDS.iter().fold(
            Self::new(Box::new(renderer)),
            |model, id| {
                model
                    .with_surface(id, "")
                    .with_toolbar(id)
                    .with_preview(id)
            },
        )
    }

    /// Mount a text surface. Remounting an id replaces its buffer.
    pub fn with_surface(mut self, id: &str, text: &str) -> Self {
        self.surfaces
            .insert(id.to_string(), EditorBuffer::from_text(text));
        self
    }

    /// Mount a hidden preview pane for the surface `id`.
    pub fn with_preview(mut self, id: &str) -> Self {
        self.previews
            .entry(id.to_string())
            .or_insert_with(PreviewPane::hidden);
        self
    }

    /// Mount a toolbar targeting `target`. A target only ever gets one
    /// toolbar; repeated mounts are ignored.
    pub fn with_toolbar(mut self, target: &str) -> Self {
        if self.toolbar_index(target).is_none() {
            self.toolbars.push(Toolbar {
                target: target.to_string(),
            });
        }
        self
    }

    pub fn surface(&self, id: &str) -> Option<&EditorBuffer> {
        self.surfaces.get(id)
    }

    pub fn preview(&self, id: &str) -> Option<&PreviewPane> {
        self.previews.get(id)
    }

    pub fn toolbar_index(&self, target: &str) -> Option<usize> {
        self.toolbars.iter().position(|t| t.target == target)
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("surfaces", &self.surfaces)
            .field("previews", &self.previews)
            .field("toolbars", &self.toolbars)
            .finish_non_exhaustive()
    }
}
