//! Browser tests, run with `wasm-pack test --headless --firefox cp-app`.

#![cfg(target_arch = "wasm32")]

use std::{cell::Cell, rc::Rc};

use cp_app::{
    dom::{self, ElementBuilder},
    poster_view::CanvasBackend,
    screens::{ScreenSet, ACTIVE_CLASS},
    story_view::StoryView,
};
use cp_core::{ElementCatalog, ElementId, GameConfig, Screen};
use cp_renderer::{PosterBackend, PosterRenderer};
use rand::{rngs::SmallRng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_root(id: &str) -> HtmlElement {
    let document = dom::document().expect("document");
    let root = ElementBuilder::new("div")
        .id(id)
        .build(&document)
        .expect("root");
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("attach root");
    root
}

fn active_screens(root: &HtmlElement) -> Vec<String> {
    let active = root
        .query_selector_all(&format!(".screen.{ACTIVE_CLASS}"))
        .expect("query");
    (0..active.length())
        .filter_map(|i| active.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|element| element.id())
        .collect()
}

#[wasm_bindgen_test]
fn builder_applies_every_field() {
    let document = dom::document().expect("document");
    let element = ElementBuilder::new("div")
        .id("built")
        .class("dialog left")
        .attr("role", "note")
        .style("margin-bottom", "15px")
        .text("你好")
        .data("id", "7")
        .build(&document)
        .expect("build");

    assert_eq!(element.id(), "built");
    assert_eq!(element.class_name(), "dialog left");
    assert_eq!(element.get_attribute("role").as_deref(), Some("note"));
    assert_eq!(
        element
            .style()
            .get_property_value("margin-bottom")
            .expect("style"),
        "15px"
    );
    assert_eq!(element.text_content().as_deref(), Some("你好"));
    assert_eq!(element.dataset().get("id").as_deref(), Some("7"));
}

#[wasm_bindgen_test]
fn builder_attaches_listeners() {
    let document = dom::document().expect("document");
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let button = ElementBuilder::new("button")
        .on("click", move |_| counter.set(counter.get() + 1))
        .build(&document)
        .expect("build");

    button.click();
    button.click();
    assert_eq!(clicks.get(), 2);
}

#[wasm_bindgen_test]
fn next_button_walks_the_story_to_completion() {
    let document = dom::document().expect("document");
    let root = fresh_root("story-root");
    let config = Rc::new(GameConfig::default());
    let story = StoryView::mount(&document, &root, &config).expect("story");

    let completed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&completed);
    story.on_complete(move |()| counter.set(counter.get() + 1));
    story.start().expect("start");

    let next: HtmlElement = root
        .query_selector(".next-btn")
        .expect("query")
        .expect("next button")
        .dyn_into()
        .expect("cast");
    for _ in 0..config.stages.len() {
        next.click();
    }
    assert_eq!(completed.get(), 1);

    next.click();
    assert_eq!(completed.get(), 1);
}

#[wasm_bindgen_test]
fn exactly_one_screen_is_active() {
    let document = dom::document().expect("document");
    let root = fresh_root("screens-root");
    let mut screens = ScreenSet::create(&document, &root).expect("screens");

    assert_eq!(active_screens(&root), vec!["loading-screen"]);
    screens.show(Screen::Story).expect("story");
    assert_eq!(active_screens(&root), vec!["story-screen"]);
    assert!(screens.show(Screen::Loading).is_err());
    assert_eq!(active_screens(&root), vec!["story-screen"]);
}

#[wasm_bindgen_test]
fn poster_renders_onto_canvas() {
    let document = dom::document().expect("document");
    let canvas = document
        .create_element("canvas")
        .expect("canvas")
        .dyn_into::<HtmlCanvasElement>()
        .expect("cast");
    let mut backend = CanvasBackend::new(canvas).expect("2d context");
    backend.resize(360, 540);
    assert_eq!(backend.size(), (360.0, 540.0));

    let data = ElementCatalog::default().poster_data(ElementId::new(1), ElementId::new(2));
    let mut rng = SmallRng::seed_from_u64(1);
    PosterRenderer::default()
        .render(&mut backend, &data, &mut rng)
        .expect("render");

    let uri = backend
        .to_data_uri(&cp_renderer::ExportSettings::default())
        .expect("export");
    assert!(uri.starts_with("data:image/"));
}
