//! Capabilities the toolbar engine works against.
//!
//! The engine never owns a text surface or a preview; the host hands them
//! in per call through these traits.

/// A selection range `[start, end)` measured in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the ends if they arrive reversed.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection (caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Chars covered; zero for a hand-built range with `end < start`.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Clamp both ends into a buffer of `len` chars.
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// An editable text buffer with a selection.
pub trait TextSurface {
    /// The full current text.
    fn value(&self) -> String;

    /// Replace the full text. Implementations keep the selection in bounds.
    fn set_value(&mut self, value: &str);

    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);
}

/// Destination for rendered preview HTML.
pub trait PreviewSink {
    fn is_visible(&self) -> bool;

    fn set_html(&mut self, html: String);
}
