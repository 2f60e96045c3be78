//! Selection-aware text splicing primitives.
//!
//! Each primitive replaces exactly the text inside the current selection and
//! reports the selection to apply afterwards. Everything outside the
//! selection is carried over untouched.

use serde::Serialize;

use crate::surface::{Selection, TextSurface};

/// Default label for [`insert_link`] when nothing is selected.
pub const LINK_LABEL: &str = "リンクテキスト";
/// URL placeholder written by [`insert_link`].
pub const LINK_URL: &str = "https://example.com";
/// Alt text written by [`insert_image`].
pub const IMAGE_ALT: &str = "画像の説明";
/// URL placeholder written by [`insert_image`].
pub const IMAGE_URL: &str = "image/your-image.png";

/// New buffer contents plus the selection to apply after the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transform {
    pub value: String,
    pub selection: Selection,
}

impl Transform {
    /// Write the result back into `surface`.
    pub fn apply_to<S: TextSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_value(&self.value);
        surface.set_selection(self.selection);
    }
}

/// A buffer cut into the text before, inside and after a selection.
struct Splice<'a> {
    before: &'a str,
    selected: &'a str,
    after: &'a str,
    start: usize,
}

impl<'a> Splice<'a> {
    fn new(text: &'a str, selection: Selection) -> Self {
        let sel = selection.clamp(text.chars().count());
        let start_byte = byte_offset(text, sel.start);
        let end_byte = byte_offset(text, sel.end);
        Self {
            before: &text[..start_byte],
            selected: &text[start_byte..end_byte],
            after: &text[end_byte..],
            start: sel.start,
        }
    }

    /// The selected text, or `placeholder` for a collapsed selection.
    fn content_or(&self, placeholder: &'a str) -> &'a str {
        if self.selected.is_empty() {
            placeholder
        } else {
            self.selected
        }
    }

    /// Swap the selection for `inserted` and select `[from, from + len)`
    /// relative to the selection start.
    fn replace(&self, inserted: &str, from: usize, len: usize) -> Transform {
        let mut value =
            String::with_capacity(self.before.len() + inserted.len() + self.after.len());
        value.push_str(self.before);
        value.push_str(inserted);
        value.push_str(self.after);
        let start = self.start + from;
        Transform {
            value,
            selection: Selection::new(start, start + len),
        }
    }
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(idx, _)| idx)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Wrap the selection (or `placeholder`) in `prefix`/`suffix` and select the
/// wrapped content.
pub fn wrap(
    text: &str,
    selection: Selection,
    prefix: &str,
    suffix: &str,
    placeholder: &str,
) -> Transform {
    let splice = Splice::new(text, selection);
    let content = splice.content_or(placeholder);
    let inserted = format!("{prefix}{content}{suffix}");
    splice.replace(&inserted, char_len(prefix), char_len(content))
}

/// Prefix every line of the selection (or `placeholder`) with `line_prefix`
/// and select the whole rewritten block.
///
/// Empty lines get the prefix with its trailing whitespace removed, so a
/// quoted blank line is `>` rather than `> `.
pub fn prefix_lines(
    text: &str,
    selection: Selection,
    line_prefix: &str,
    placeholder: &str,
) -> Transform {
    let splice = Splice::new(text, selection);
    let content = splice.content_or(placeholder);
    let bare = line_prefix.trim_end();
    let replaced = content
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                bare.to_string()
            } else {
                format!("{line_prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    splice.replace(&replaced, 0, char_len(&replaced))
}

/// Insert `[label](url)` using the selection as the label and select the URL.
pub fn link(text: &str, selection: Selection) -> Transform {
    let splice = Splice::new(text, selection);
    let label = splice.content_or(LINK_LABEL);
    let inserted = format!("[{label}]({LINK_URL})");
    // `[`, `]` and `(` precede the URL.
    splice.replace(&inserted, char_len(label) + 3, char_len(LINK_URL))
}

/// Insert `![alt](url)` over the selection and select the URL.
///
/// The selected text is discarded; the alt text is always the placeholder.
pub fn image(text: &str, selection: Selection) -> Transform {
    let splice = Splice::new(text, selection);
    let inserted = format!("![{IMAGE_ALT}]({IMAGE_URL})");
    splice.replace(&inserted, char_len(IMAGE_ALT) + 4, char_len(IMAGE_URL))
}

pub fn wrap_selection<S: TextSurface + ?Sized>(
    surface: &mut S,
    prefix: &str,
    suffix: &str,
    placeholder: &str,
) -> Transform {
    let result = wrap(
        &surface.value(),
        surface.selection(),
        prefix,
        suffix,
        placeholder,
    );
    result.apply_to(surface);
    result
}

pub fn prefix_selection_lines<S: TextSurface + ?Sized>(
    surface: &mut S,
    line_prefix: &str,
    placeholder: &str,
) -> Transform {
    let result = prefix_lines(&surface.value(), surface.selection(), line_prefix, placeholder);
    result.apply_to(surface);
    result
}

pub fn insert_link<S: TextSurface + ?Sized>(surface: &mut S) -> Transform {
    let result = link(&surface.value(), surface.selection());
    result.apply_to(surface);
    result
}

pub fn insert_image<S: TextSurface + ?Sized>(surface: &mut S) -> Transform {
    let result = image(&surface.value(), surface.selection());
    result.apply_to(surface);
    result
}
