//! # Chem CP WASM Application
//!
//! Browser shell for the chemistry pairing game. Creates the four screen
//! containers, runs the story, the pairing game and the poster in order,
//! and saves the poster.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web cp-app
//! ```
//!
//! Then import in JavaScript:
//! ```javascript
//! import init, { ChemCpApp } from './pkg/cp_app.js';
//!
//! await init();
//! const app = new ChemCpApp('app');
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod boot;
pub mod dom;
pub mod error;
pub mod pairing_view;
pub mod platform;
pub mod poster_view;
pub mod screens;
pub mod story_view;

use std::{cell::RefCell, rc::Rc};

use cp_core::{GameConfig, Screen};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

pub use error::{AppError, AppResult};
pub use platform::Platform;

use boot::BootOverlay;
use pairing_view::PairingView;
use poster_view::PosterView;
use screens::ScreenSet;
use story_view::StoryView;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Chem CP WASM initialized");
}

/// Default configuration as JSON, for pages that want to tweak it.
///
/// # Errors
///
/// Returns an error if serialisation fails.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<String, JsValue> {
    serde_json::to_string_pretty(&GameConfig::default())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

type ScreensHandle = Rc<RefCell<ScreenSet>>;

/// The game, mounted into a root element.
#[wasm_bindgen]
pub struct ChemCpApp {
    screens: ScreensHandle,
    platform: Platform,
}

#[wasm_bindgen]
impl ChemCpApp {
    /// Mount the game into the element with id `root_id`.
    ///
    /// `config_json` optionally overrides [`GameConfig`] fields. The loading
    /// screen shows for the configured preload delay before the story starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the root element
    /// is missing.
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: &str, config_json: Option<String>) -> Result<ChemCpApp, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(AppError::from)?,
            None => GameConfig::default(),
        };
        let config = Rc::new(config);

        let document = dom::document()?;
        let root: HtmlElement = dom::by_id(&document, root_id)?;
        let boot = BootOverlay::mount(&document)?;
        boot::watch_page_load(&dom::window()?, &document)?;
        let platform = Platform::detect();

        let screens = Rc::new(RefCell::new(ScreenSet::create(&document, &root)?));
        tracing::info!("Screens created, preloading for {}ms", config.preload_delay_ms);

        let delay = u32::try_from(config.preload_delay_ms).unwrap_or(u32::MAX);
        let launch_screens = Rc::clone(&screens);
        Timeout::new(delay, move || {
            match launch(&document, &config, &launch_screens, platform) {
                Ok(()) => boot.dismiss(),
                Err(err) => tracing::error!("Launch failed: {err}"),
            }
        })
        .forget();

        Ok(Self { screens, platform })
    }

    /// Name of the visible screen.
    #[wasm_bindgen(js_name = currentScreen)]
    #[must_use]
    pub fn current_screen(&self) -> String {
        format!("{:?}", self.screens.borrow().current()).to_lowercase()
    }

    /// Whether the page runs inside WeChat.
    #[wasm_bindgen(js_name = isWechat)]
    #[must_use]
    pub fn is_wechat(&self) -> bool {
        self.platform.is_wechat()
    }
}

/// Mount the three game screens, chain their completion signals and show
/// the story.
fn launch(
    document: &Document,
    config: &Rc<GameConfig>,
    screens: &ScreensHandle,
    platform: Platform,
) -> AppResult<()> {
    let (story_root, pairing_root, poster_root) = {
        let set = screens.borrow();
        let container = |screen: Screen| {
            set.container(screen)
                .cloned()
                .ok_or_else(|| AppError::MissingElement(screen.container_id().to_string()))
        };
        (
            container(Screen::Story)?,
            container(Screen::Pairing)?,
            container(Screen::Poster)?,
        )
    };

    let story = StoryView::mount(document, &story_root, config)?;
    let pairing = PairingView::mount(document, &pairing_root, config)?;
    let poster = PosterView::mount(document, &poster_root, config, platform)?;

    {
        let screens = Rc::clone(screens);
        let pairing = Rc::clone(&pairing);
        story.on_complete(move |()| {
            let shown = screens.borrow_mut().show(Screen::Pairing);
            if let Err(err) = shown.and_then(|()| pairing.start()) {
                tracing::error!("Entering pairing failed: {err}");
            }
        });
    }

    {
        let screens = Rc::clone(screens);
        let delay = u32::try_from(config.success_notice_ms).unwrap_or(u32::MAX);
        pairing.on_complete(move |(first, second)| {
            let screens = Rc::clone(&screens);
            let poster = Rc::clone(&poster);
            // Leave the success card up before moving on.
            Timeout::new(delay, move || {
                let shown = screens.borrow_mut().show(Screen::Poster);
                if let Err(err) = shown.and_then(|()| poster.generate(first, second)) {
                    tracing::error!("Entering poster failed: {err}");
                }
            })
            .forget();
        });
    }

    screens.borrow_mut().show(Screen::Story)?;
    story.start()?;
    tracing::info!("App ready");
    Ok(())
}
