//! Screen containers.
//!
//! One `<div class="screen">` per [`Screen`]; exactly one of them carries the
//! `active` class, always the one [`AppFlow`] points at.

use cp_core::{AppFlow, Screen};
use web_sys::{Document, HtmlElement};

use crate::dom::{set_class, ElementBuilder};
use crate::error::{AppResult, JsResultExt};

/// Class marking the visible screen.
pub const ACTIVE_CLASS: &str = "active";

/// Id of the poster canvas inside the poster screen.
pub const POSTER_CANVAS_ID: &str = "poster-canvas";

/// Id of the save button inside the poster screen.
pub const SAVE_BUTTON_ID: &str = "save-btn";

/// The four screen containers and the flow that selects between them.
pub struct ScreenSet {
    containers: Vec<(Screen, HtmlElement)>,
    flow: AppFlow,
}

impl ScreenSet {
    /// Create the containers under `root` and show the loading screen.
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be created or attached.
    pub fn create(document: &Document, root: &HtmlElement) -> AppResult<Self> {
        let mut containers = Vec::with_capacity(Screen::ALL.len());
        for screen in Screen::ALL {
            let builder = ElementBuilder::new("div")
                .id(screen.container_id())
                .class("screen");
            let container = match screen {
                Screen::Loading => builder.html(r#"<div class="loader">加载中...</div>"#),
                Screen::Poster => builder.html(format!(
                    r#"<canvas id="{POSTER_CANVAS_ID}"></canvas><button id="{SAVE_BUTTON_ID}">保存海报</button>"#
                )),
                Screen::Story | Screen::Pairing => builder,
            }
            .build(document)?;
            root.append_child(&container).js_context("appendChild")?;
            containers.push((screen, container));
        }

        let set = Self {
            containers,
            flow: AppFlow::new(),
        };
        set.sync();
        Ok(set)
    }

    /// Switch to `screen`, which must follow the current one.
    ///
    /// # Errors
    ///
    /// Returns an error for a backward or skipping transition.
    pub fn show(&mut self, screen: Screen) -> AppResult<()> {
        self.flow.advance_to(screen)?;
        self.sync();
        Ok(())
    }

    /// Screen currently shown.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.flow.current()
    }

    /// Container element of `screen`.
    #[must_use]
    pub fn container(&self, screen: Screen) -> Option<&HtmlElement> {
        self.containers
            .iter()
            .find(|(s, _)| *s == screen)
            .map(|(_, container)| container)
    }

    fn sync(&self) {
        let current = self.flow.current();
        for (screen, container) in &self.containers {
            set_class(container, ACTIVE_CLASS, *screen == current);
        }
    }
}
