use ropey::Rope;

use crate::surface::{Selection, TextSurface};

/// A text buffer backed by a rope data structure.
///
/// Stands in for a form textarea: it holds the markdown source and the
/// current selection, both addressed in char offsets.
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string with the caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after the form is submitted).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The text covered by the current selection.
    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// Select `[start, end)`, clamped to the buffer.
    pub fn select(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamp(self.len_chars());
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len_chars());
    }

    /// Collapse the selection to a caret at the end of the buffer.
    pub fn move_to_end(&mut self) {
        self.selection = Selection::caret(self.len_chars());
    }

    /// Replace the selection with `s`, leaving the caret after it.
    ///
    /// This is what typing over a selected placeholder does.
    pub fn replace_selection(&mut self, s: &str) {
        let Selection { start, end } = self.selection;
        if start == end && s.is_empty() {
            return;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, s);
        self.selection = Selection::caret(start + s.chars().count());
        self.dirty = true;
    }
}

impl TextSurface for EditorBuffer {
    fn value(&self) -> String {
        self.text()
    }

    fn set_value(&mut self, value: &str) {
        if self.rope == value {
            return;
        }
        self.rope = Rope::from_str(value);
        self.selection = self.selection.clamp(self.rope.len_chars());
        self.dirty = true;
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.rope.len_chars());
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}
