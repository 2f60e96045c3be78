use crate::app::Model;
use crate::preview::{refresh_if_visible, toggle_preview};
use crate::toolbar::dispatch;
use crate::surface::TextSurface;

/// All events the host UI delivers to the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A toolbar button was clicked
    ToolbarClick { toolbar: usize, tag: String },
    /// The user typed; `value` is the field's full new text.
    ///
    /// `caret` is the field's caret after the edit in chars; `None` puts it
    /// at the end, as after a paste or programmatic fill.
    Input {
        surface: String,
        value: String,
        caret: Option<usize>,
    },
    /// The selection in a field changed
    Select {
        surface: String,
        start: usize,
        end: usize,
    },
    /// The preview toggle for a field was clicked
    TogglePreview { target: String },
}

/// Apply one message to the model.
///
/// Messages naming a toolbar, surface or preview that is not mounted leave
/// the model unchanged.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ToolbarClick { toolbar, tag } => {
            let Some(target) = model.toolbars.get(toolbar).map(|t| t.target.clone()) else {
                tracing::debug!(toolbar, "no such toolbar");
                return model;
            };
            dispatch(
                &tag,
                model.surfaces.get_mut(&target),
                model.previews.get_mut(&target),
                model.renderer.as_ref(),
            );
        }
        Message::Input {
            surface,
            value,
            caret,
        } => {
            let Some(buffer) = model.surfaces.get_mut(&surface) else {
                tracing::debug!(surface = %surface, "input for unmounted surface");
                return model;
            };
            buffer.set_value(&value);
            match caret {
                Some(offset) => buffer.select(offset, offset),
                None => buffer.move_to_end(),
            }
            if let Some(pane) = model.previews.get_mut(&surface) {
                refresh_if_visible(&*buffer, pane, model.renderer.as_ref());
            }
        }
        Message::Select {
            surface,
            start,
            end,
        } => {
            if let Some(buffer) = model.surfaces.get_mut(&surface) {
                buffer.select(start, end);
            }
        }
        Message::TogglePreview { target } => {
            let (Some(buffer), Some(pane)) =
                (model.surfaces.get(&target), model.previews.get_mut(&target))
            else {
                tracing::debug!(surface = %target, "preview toggle without surface or pane");
                return model;
            };
            let shown = toggle_preview(buffer, pane, model.renderer.as_ref());
            tracing::debug!(surface = %target, shown, "toggled preview");
        }
    }
    model
}
