//! Global boot overlay shown until the first screen is ready, and the
//! page-load timing log.

use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement, Window};

use crate::dom::{listen, ElementBuilder};
use crate::error::{AppError, AppResult, JsResultExt};

/// Delay before the overlay starts fading.
pub const FADE_DELAY_MS: u32 = 1000;

/// Delay between the fade starting and the overlay leaving the DOM.
pub const REMOVE_DELAY_MS: u32 = 500;

const OVERLAY_ID: &str = "global-loading";

const OVERLAY_HTML: &str = r#"
<div class="loading-content">
  <div class="chemistry-loader">
    <div class="flask"></div>
    <div class="bubbles">
      <div class="bubble"></div>
      <div class="bubble"></div>
      <div class="bubble"></div>
    </div>
  </div>
  <p>正在准备化学实验室...</p>
</div>"#;

/// Full-page loader appended to `<body>`.
pub struct BootOverlay {
    element: HtmlElement,
}

impl BootOverlay {
    /// Append the overlay to the document body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is missing or the overlay cannot be
    /// attached.
    pub fn mount(document: &Document) -> AppResult<Self> {
        let body = document.body().ok_or(AppError::NoDom("body"))?;
        let element = ElementBuilder::new("div")
            .id(OVERLAY_ID)
            .html(OVERLAY_HTML)
            .build(document)?;
        body.append_child(&element).js_context("appendChild")?;
        Ok(Self { element })
    }

    /// Fade the overlay out, then remove it.
    pub fn dismiss(self) {
        let element = self.element;
        Timeout::new(FADE_DELAY_MS, move || {
            if let Err(err) = element.style().set_property("opacity", "0") {
                tracing::warn!("Boot overlay fade failed: {err:?}");
            }
            Timeout::new(REMOVE_DELAY_MS, move || {
                element.remove();
                tracing::debug!("Boot overlay removed");
            })
            .forget();
        })
        .forget();
    }
}

/// Milliseconds from navigation start to the end of the load event.
///
/// `None` until the load event has finished (`loadEventEnd` is still 0).
#[must_use]
pub fn load_time_ms(navigation_start: f64, load_event_end: f64) -> Option<f64> {
    (load_event_end > 0.0).then(|| load_event_end - navigation_start)
}

fn log_load_time(window: &Window) {
    let Some(performance) = window.performance() else {
        tracing::debug!("Performance API unavailable");
        return;
    };
    let timing = performance.timing();
    match load_time_ms(timing.navigation_start(), timing.load_event_end()) {
        Some(ms) => tracing::info!("Page load time: {ms}ms"),
        None => tracing::debug!("Load event not finished, no load time"),
    }
}

/// Log the page-load time once the `load` event has completed.
///
/// `loadEventEnd` is only set after every load handler returns, so the read
/// is pushed to the next task.
///
/// # Errors
///
/// Returns an error if the listener cannot be attached.
pub fn watch_page_load(window: &Window, document: &Document) -> AppResult<()> {
    if document.ready_state() == "complete" {
        log_load_time(window);
        return Ok(());
    }
    let handle = window.clone();
    listen(window, "load", move |_| {
        let window = handle.clone();
        Timeout::new(0, move || log_load_time(&window)).forget();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_time_is_span_from_navigation_start() {
        let ms = load_time_ms(1_000.0, 1_850.0).expect("load finished");
        assert!((ms - 850.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unfinished_load_event_has_no_time() {
        assert!(load_time_ms(1_000.0, 0.0).is_none());
    }
}
