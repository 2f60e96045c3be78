//! Markdown toolbar engine.
//!
//! Translates a toolbar action plus the current [`TextSurface`] state into a
//! new surface state, then refreshes the paired preview if it is visible.
//!
//! The action set is closed: every [`Action`] maps through [`ACTIONS`] to one
//! of four [`Primitive`] edits with fixed arguments.

mod transform;

use std::fmt;
use std::str::FromStr;

pub use transform::{
    IMAGE_ALT, IMAGE_URL, LINK_LABEL, LINK_URL, Transform, image, insert_image, insert_link, link,
    prefix_lines, prefix_selection_lines, wrap, wrap_selection,
};

use crate::preview::{Renderer, refresh_if_visible};
use crate::surface::{PreviewSink, TextSurface};

/// A markdown formatting action offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Heading,
    Bold,
    Italic,
    Quote,
    List,
    InlineCode,
    CodeBlock,
    Link,
    Image,
}

/// The edit an action performs, with its literal arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
        placeholder: &'static str,
    },
    PrefixLines {
        prefix: &'static str,
        placeholder: &'static str,
    },
    Link,
    Image,
}

/// One row of the action table.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub action: Action,
    pub tag: &'static str,
    /// Older tag accepted for the same action.
    pub alias: Option<&'static str>,
    /// Toolbar button caption.
    pub label: &'static str,
    pub primitive: Primitive,
}

/// Action table, indexed by `Action as usize`.
pub static ACTIONS: [ActionSpec; 9] = [
    ActionSpec {
        action: Action::Heading,
        tag: "heading",
        alias: Some("h2"),
        label: "H2",
        primitive: Primitive::PrefixLines {
            prefix: "## ",
            placeholder: "見出し",
        },
    },
    ActionSpec {
        action: Action::Bold,
        tag: "bold",
        alias: None,
        label: "太字",
        primitive: Primitive::Wrap {
            prefix: "**",
            suffix: "**",
            placeholder: "太字",
        },
    },
    ActionSpec {
        action: Action::Italic,
        tag: "italic",
        alias: None,
        label: "斜体",
        primitive: Primitive::Wrap {
            prefix: "*",
            suffix: "*",
            placeholder: "斜体",
        },
    },
    ActionSpec {
        action: Action::Quote,
        tag: "quote",
        alias: None,
        label: "引用",
        primitive: Primitive::PrefixLines {
            prefix: "> ",
            placeholder: "引用文",
        },
    },
    ActionSpec {
        action: Action::List,
        tag: "list",
        alias: None,
        label: "箇条書き",
        primitive: Primitive::PrefixLines {
            prefix: "- ",
            placeholder: "リスト項目",
        },
    },
    ActionSpec {
        action: Action::InlineCode,
        tag: "inline-code",
        alias: Some("code"),
        label: "`code`",
        primitive: Primitive::Wrap {
            prefix: "`",
            suffix: "`",
            placeholder: "code",
        },
    },
    ActionSpec {
        action: Action::CodeBlock,
        tag: "code-block",
        alias: Some("codeblock"),
        label: "```",
        primitive: Primitive::Wrap {
            prefix: "```\n",
            suffix: "\n```",
            placeholder: "code",
        },
    },
    ActionSpec {
        action: Action::Link,
        tag: "link",
        alias: None,
        label: "リンク",
        primitive: Primitive::Link,
    },
    ActionSpec {
        action: Action::Image,
        tag: "image",
        alias: None,
        label: "画像",
        primitive: Primitive::Image,
    },
];

impl Action {
    /// All actions in toolbar button order.
    pub const ALL: [Self; 9] = [
        Self::Heading,
        Self::Bold,
        Self::Italic,
        Self::Quote,
        Self::List,
        Self::InlineCode,
        Self::CodeBlock,
        Self::Link,
        Self::Image,
    ];

    pub fn spec(self) -> &'static ActionSpec {
        &ACTIONS[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.spec().tag
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Parse a tag, returning `None` for anything outside the action set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ACTIONS
            .iter()
            .find(|spec| spec.tag == tag || spec.alias == Some(tag))
            .map(|spec| spec.action)
    }

    /// Apply this action to `surface`.
    pub fn apply<S: TextSurface + ?Sized>(self, surface: &mut S) -> Transform {
        match self.spec().primitive {
            Primitive::Wrap {
                prefix,
                suffix,
                placeholder,
            } => wrap_selection(surface, prefix, suffix, placeholder),
            Primitive::PrefixLines {
                prefix,
                placeholder,
            } => prefix_selection_lines(surface, prefix, placeholder),
            Primitive::Link => insert_link(surface),
            Primitive::Image => insert_image(surface),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown toolbar action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Handle a toolbar click.
///
/// Unknown tags and a missing surface are no-ops. After a successful edit the
/// preview is re-rendered only when it is visible.
pub fn dispatch<S, P, R>(
    tag: &str,
    surface: Option<&mut S>,
    preview: Option<&mut P>,
    renderer: &R,
) -> Option<Transform>
where
    S: TextSurface + ?Sized,
    P: PreviewSink + ?Sized,
    R: Renderer + ?Sized,
{
    let Some(surface) = surface else {
        tracing::debug!(tag, "toolbar target not mounted; ignoring");
        return None;
    };
    let Some(action) = Action::from_tag(tag) else {
        tracing::debug!(tag, "unknown toolbar action; ignoring");
        return None;
    };
    let result = action.apply(surface);
    tracing::debug!(
        action = %action,
        start = result.selection.start,
        end = result.selection.end,
        "applied toolbar action"
    );
    if let Some(preview) = preview {
        refresh_if_visible(&*surface, preview, renderer);
    }
    Some(result)
}
