use std::cell::RefCell;
use std::rc::Rc;

use crate::preview::{ComrakRenderer, HIDE_LABEL, PLACEHOLDER_HTML, Renderer, SHOW_LABEL};
use crate::surface::{Selection, TextSurface};

use super::{ADMIN_MARKDOWN_FIELDS, Message, Model, Toolbar, update};

/// Renderer that logs every input it sees.
#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    fn renders(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Renderer for Log {
    fn render(&self, markdown: &str) -> String {
        self.0.borrow_mut().push(markdown.to_string());
        format!("<div>{markdown}</div>")
    }
}

fn create_test_model(text: &str) -> (Model, Log) {
    let log = Log::default();
    let model = Model::new(Box::new(log.clone()))
        .with_surface("body", text)
        .with_toolbar("body")
        .with_preview("body");
    (model, log)
}

fn click(tag: &str) -> Message {
    Message::ToolbarClick {
        toolbar: 0,
        tag: tag.to_string(),
    }
}

fn input(value: &str) -> Message {
    Message::Input {
        surface: "body".to_string(),
        value: value.to_string(),
        caret: None,
    }
}

fn select(start: usize, end: usize) -> Message {
    Message::Select {
        surface: "body".to_string(),
        start,
        end,
    }
}

fn toggle() -> Message {
    Message::TogglePreview {
        target: "body".to_string(),
    }
}

fn body(model: &Model) -> String {
    model.surface("body").unwrap().text()
}

#[test]
fn test_toolbar_buttons_follow_action_order() {
    let buttons: Vec<_> = Toolbar::buttons().collect();
    assert_eq!(buttons.len(), 9);
    assert_eq!(buttons[0], ("heading", "H2"));
    assert_eq!(buttons[8], ("image", "画像"));
}

#[test]
fn test_with_toolbar_is_built_once_per_target() {
    let (model, _) = create_test_model("");
    let model = model.with_toolbar("body").with_toolbar("other");
    assert_eq!(model.toolbars.len(), 2);
    assert_eq!(model.toolbar_index("other"), Some(1));
}

#[test]
fn test_admin_model_mounts_every_markdown_field() {
    let model = Model::admin(ComrakRenderer::default());
    for id in ADMIN_MARKDOWN_FIELDS {
        assert!(model.surface(id).is_some(), "{id} surface");
        assert!(model.toolbar_index(id).is_some(), "{id} toolbar");
        assert_eq!(model.preview(id).map(|p| p.toggle_label()), Some(SHOW_LABEL));
    }
}

#[test]
fn test_bold_click_on_caret_inserts_placeholder() {
    let (model, _) = create_test_model("Hi ");
    let model = update(model, select(3, 3));
    let model = update(model, click("bold"));
    assert_eq!(body(&model), "Hi **太字**");
    assert_eq!(model.surface("body").unwrap().selected_text(), "太字");
}

#[test]
fn test_quote_click_on_multiline_selection() {
    let (model, _) = create_test_model("a\n\nb");
    let model = update(model, select(0, 4));
    let model = update(model, click("quote"));
    assert_eq!(body(&model), "> a\n>\n> b");
    assert_eq!(
        model.surface("body").unwrap().selection(),
        Selection::new(0, 9)
    );
}

#[test]
fn test_unknown_toolbar_is_noop() {
    let (model, log) = create_test_model("text");
    let model = update(
        model,
        Message::ToolbarClick {
            toolbar: 3,
            tag: "bold".to_string(),
        },
    );
    assert_eq!(body(&model), "text");
    assert!(log.renders().is_empty());
}

#[test]
fn test_toolbar_whose_target_is_not_mounted_is_noop() {
    let log = Log::default();
    let model = Model::new(Box::new(log.clone())).with_toolbar("ghost");
    let model = update(model, click("bold"));
    assert!(model.surface("ghost").is_none());
    assert!(log.renders().is_empty());
}

#[test]
fn test_unknown_tag_is_noop() {
    let (model, _) = create_test_model("text");
    let model = update(model, click("marquee"));
    assert_eq!(body(&model), "text");
    assert!(!model.surface("body").unwrap().is_dirty());
}

#[test]
fn test_input_moves_caret_to_end() {
    let (model, _) = create_test_model("");
    let model = update(model, input("hello"));
    assert_eq!(
        model.surface("body").unwrap().selection(),
        Selection::caret(5)
    );
}

#[test]
fn test_mid_text_input_keeps_the_reported_caret() {
    let (model, _) = create_test_model("hello world");
    let model = update(
        model,
        Message::Input {
            surface: "body".to_string(),
            value: "hello, world".to_string(),
            caret: Some(6),
        },
    );
    assert_eq!(
        model.surface("body").unwrap().selection(),
        Selection::caret(6)
    );

    // A following bold click wraps at the caret, not at the end.
    let model = update(model, click("bold"));
    assert_eq!(body(&model), "hello,**太字** world");
}

#[test]
fn test_input_caret_past_the_end_is_clamped() {
    let (model, _) = create_test_model("");
    let model = update(
        model,
        Message::Input {
            surface: "body".to_string(),
            value: "abc".to_string(),
            caret: Some(99),
        },
    );
    assert_eq!(
        model.surface("body").unwrap().selection(),
        Selection::caret(3)
    );
}

#[test]
fn test_input_for_unknown_surface_is_noop() {
    let (model, _) = create_test_model("keep");
    let model = update(
        model,
        Message::Input {
            surface: "nope".to_string(),
            value: "x".to_string(),
            caret: None,
        },
    );
    assert_eq!(body(&model), "keep");
    assert!(model.surface("nope").is_none());
}

#[test]
fn test_first_toggle_renders_current_content() {
    let (model, log) = create_test_model("# Title");
    let model = update(model, toggle());
    assert_eq!(log.renders(), vec!["# Title".to_string()]);
    let pane = model.preview("body").unwrap();
    assert_eq!(pane.html(), Some("<div># Title</div>"));
    assert_eq!(pane.toggle_label(), HIDE_LABEL);
}

#[test]
fn test_visible_preview_renders_on_every_input() {
    let (model, log) = create_test_model("");
    let model = update(model, toggle());
    let model = update(model, input("a"));
    let model = update(model, input("ab"));
    let model = update(model, click("italic"));
    assert_eq!(
        log.renders(),
        vec!["a".to_string(), "ab".to_string(), "ab*斜体*".to_string()]
    );
    assert_eq!(
        model.preview("body").unwrap().html(),
        Some("<div>ab*斜体*</div>")
    );
}

#[test]
fn test_empty_buffer_preview_shows_placeholder() {
    let (model, log) = create_test_model("   ");
    let model = update(model, toggle());
    assert!(log.renders().is_empty());
    assert_eq!(model.preview("body").unwrap().html(), Some(PLACEHOLDER_HTML));
}

#[test]
fn test_hidden_edits_render_once_on_reveal() {
    let (model, log) = create_test_model("");
    let model = update(model, toggle());
    let model = update(model, toggle());
    let model = update(model, input("draft"));
    let model = update(model, input("draft two"));
    let model = update(model, click("bold"));
    assert!(log.renders().is_empty(), "hidden pane must not render");

    let model = update(model, toggle());
    assert_eq!(log.renders(), vec!["draft two**太字**".to_string()]);
    assert_eq!(
        model.preview("body").unwrap().html(),
        Some("<div>draft two**太字**</div>")
    );
}

#[test]
fn test_toggle_without_pane_is_noop() {
    let log = Log::default();
    let model = Model::new(Box::new(log.clone())).with_surface("body", "x");
    let model = update(model, toggle());
    assert!(model.preview("body").is_none());
    assert!(log.renders().is_empty());
}

#[test]
fn test_overtyped_link_url_survives_next_action() {
    let (model, _) = create_test_model("docs");
    let model = update(model, select(0, 4));
    let model = update(model, click("link"));
    let sel = model.surface("body").unwrap().selection();
    assert_eq!(sel, Selection::new(7, 26));

    // Type the URL in place of the placeholder, then bold the label.
    let mut model = model;
    model
        .surfaces
        .get_mut("body")
        .unwrap()
        .replace_selection("https://docs.rs");
    let model = update(model, select(1, 5));
    let model = update(model, click("bold"));
    assert_eq!(body(&model), "[**docs**](https://docs.rs)");
}

#[test]
fn test_admin_model_renders_with_comrak() {
    let model = Model::admin(ComrakRenderer::default());
    let model = update(
        model,
        Message::Input {
            surface: "blog-content".to_string(),
            value: "line one\nline two".to_string(),
            caret: None,
        },
    );
    let model = update(
        model,
        Message::TogglePreview {
            target: "blog-content".to_string(),
        },
    );
    let html = model.preview("blog-content").unwrap().html().unwrap();
    assert!(html.contains("line one<br />"), "got: {html}");
}
