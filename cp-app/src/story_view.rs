//! Story screen: background, dialog bubbles and a next button.

use std::{cell::RefCell, rc::Rc};

use cp_core::{GameConfig, Stage, StoryController};
use web_sys::{Document, HtmlElement};

use crate::dom::ElementBuilder;
use crate::error::{AppResult, JsResultExt};

/// Story screen bound to its container.
pub struct StoryView {
    controller: RefCell<StoryController>,
    document: Document,
    background: HtmlElement,
    dialogs: HtmlElement,
    config: Rc<GameConfig>,
}

impl StoryView {
    /// Build the story screen inside `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config has no stages or the DOM rejects an
    /// element.
    pub fn mount(
        document: &Document,
        container: &HtmlElement,
        config: &Rc<GameConfig>,
    ) -> AppResult<Rc<Self>> {
        let controller = StoryController::new(config.stages.clone())?;
        container.set_inner_html("");

        let background = ElementBuilder::new("div")
            .class("story-bg")
            .style("position", "absolute")
            .style("width", "100%")
            .style("height", "100%")
            .style("background-size", "cover")
            .build(document)?;
        let dialogs = ElementBuilder::new("div")
            .class("dialog-container")
            .style("position", "absolute")
            .style("bottom", "20%")
            .style("width", "100%")
            .style("padding", "0 20px")
            .build(document)?;
        container.append_child(&background).js_context("appendChild")?;
        container.append_child(&dialogs).js_context("appendChild")?;

        let view = Rc::new(Self {
            controller: RefCell::new(controller),
            document: document.clone(),
            background,
            dialogs,
            config: Rc::clone(config),
        });

        let handle = Rc::clone(&view);
        let next_button = ElementBuilder::new("button")
            .class("next-btn")
            .text("下一步")
            .style("position", "absolute")
            .style("bottom", "10%")
            .style("left", "50%")
            .style("transform", "translateX(-50%)")
            .style("padding", "10px 30px")
            .style("font-size", "16px")
            .on("click", move |_| {
                if let Err(err) = handle.next() {
                    tracing::warn!("Story advance failed: {err}");
                }
            })
            .build(document)?;
        container.append_child(&next_button).js_context("appendChild")?;

        Ok(view)
    }

    /// Register the story-complete listener.
    pub fn on_complete(&self, listener: impl FnMut(()) + 'static) {
        self.controller.borrow_mut().on_complete(listener);
    }

    /// Show the first stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage cannot be rendered.
    pub fn start(&self) -> AppResult<()> {
        let mut controller = self.controller.borrow_mut();
        let stage = controller.start();
        self.render(stage)
    }

    /// Advance one stage; completes the story after the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the next stage cannot be rendered.
    pub fn next(&self) -> AppResult<()> {
        let mut controller = self.controller.borrow_mut();
        match controller.next() {
            Some(stage) => self.render(stage),
            None => Ok(()),
        }
    }

    /// Replace the background and dialogs with `stage`.
    fn render(&self, stage: &Stage) -> AppResult<()> {
        self.background
            .style()
            .set_property(
                "background-image",
                &format!("url({})", self.config.background_url(&stage.background)),
            )
            .js_context("style.setProperty")?;

        self.dialogs.set_inner_html("");
        for dialog in &stage.dialogs {
            let bubble = ElementBuilder::new("div")
                .class(format!("dialog {}", dialog.position.class_name()))
                .style("margin-bottom", "15px")
                .style("animation", "fadeIn 0.5s forwards")
                .build(&self.document)?;
            let character = ElementBuilder::new("div")
                .class("character")
                .text(dialog.character.as_str())
                .build(&self.document)?;
            let text = ElementBuilder::new("div")
                .class("text")
                .text(dialog.text.as_str())
                .build(&self.document)?;

            bubble.append_child(&character).js_context("appendChild")?;
            bubble.append_child(&text).js_context("appendChild")?;
            self.dialogs.append_child(&bubble).js_context("appendChild")?;
        }
        Ok(())
    }
}
