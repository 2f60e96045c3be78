//! Live markdown preview.
//!
//! This module handles:
//! - Rendering markdown to HTML with comrak (GFM, hard line breaks)
//! - The preview pane paired with a text surface
//! - The lazy refresh policy: render only while the pane is visible
//! - Live preview of a file on disk

mod live;

use comrak::{Options, markdown_to_html};

use crate::surface::{PreviewSink, TextSurface};

pub use live::LivePreview;

/// Shown in place of an empty document.
pub const PLACEHOLDER_HTML: &str = r#"<p class="text-gray-500">プレビューがここに表示されます。</p>"#;

/// Toggle caption while the pane is hidden.
pub const SHOW_LABEL: &str = "プレビュー";
/// Toggle caption while the pane is shown.
pub const HIDE_LABEL: &str = "プレビューを閉じる";

/// Converts markdown source to HTML.
pub trait Renderer {
    fn render(&self, markdown: &str) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Knobs for [`ComrakRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render soft line breaks as `<br />`.
    pub hard_breaks: bool,
    /// Enable the GitHub-flavored extensions.
    pub gfm: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            gfm: true,
        }
    }
}

/// comrak-backed renderer. Raw HTML in the source is never passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer {
    options: RenderOptions,
}

impl ComrakRenderer {
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> RenderOptions {
        self.options
    }
}

impl Renderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::default();
        options.render.hardbreaks = self.options.hard_breaks;
        if self.options.gfm {
            options.extension.strikethrough = true;
            options.extension.table = true;
            options.extension.autolink = true;
            options.extension.tasklist = true;
            options.extension.tagfilter = true;
        }
        markdown_to_html(markdown, &options)
    }
}

/// The rendered-HTML pane paired with one text surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewPane {
    visible: bool,
    html: Option<String>,
}

impl PreviewPane {
    /// A pane that starts hidden. This is how panes are mounted.
    pub const fn hidden() -> Self {
        Self {
            visible: false,
            html: None,
        }
    }

    pub const fn visible() -> Self {
        Self {
            visible: true,
            html: None,
        }
    }

    /// Last rendered HTML, if the pane has ever been rendered.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Caption for the toggle control in the pane's current state.
    pub const fn toggle_label(&self) -> &'static str {
        if self.visible { HIDE_LABEL } else { SHOW_LABEL }
    }
}

impl PreviewSink for PreviewPane {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_html(&mut self, html: String) {
        self.html = Some(html);
    }
}

/// Render the surface's trimmed content into `sink` unconditionally.
pub fn refresh_preview<S, P, R>(surface: &S, sink: &mut P, renderer: &R)
where
    S: TextSurface + ?Sized,
    P: PreviewSink + ?Sized,
    R: Renderer + ?Sized,
{
    let value = surface.value();
    let content = value.trim();
    let html = if content.is_empty() {
        PLACEHOLDER_HTML.to_string()
    } else {
        renderer.render(content)
    };
    tracing::trace!(bytes = html.len(), "rendered preview");
    sink.set_html(html);
}

/// Render only when `sink` is visible. Returns whether a render happened.
pub fn refresh_if_visible<S, P, R>(surface: &S, sink: &mut P, renderer: &R) -> bool
where
    S: TextSurface + ?Sized,
    P: PreviewSink + ?Sized,
    R: Renderer + ?Sized,
{
    if !sink.is_visible() {
        return false;
    }
    refresh_preview(surface, sink, renderer);
    true
}

/// Flip the pane's visibility, rendering immediately when it opens.
///
/// Returns the new visibility.
pub fn toggle_preview<S, R>(surface: &S, pane: &mut PreviewPane, renderer: &R) -> bool
where
    S: TextSurface + ?Sized,
    R: Renderer + ?Sized,
{
    let will_show = !pane.is_visible();
    pane.set_visible(will_show);
    if will_show {
        refresh_preview(surface, pane, renderer);
    }
    will_show
}
