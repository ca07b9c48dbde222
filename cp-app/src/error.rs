//! Application error types.

use cp_core::CoreError;
use cp_renderer::RenderError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while mounting or driving the page.
#[derive(Debug, Error)]
pub enum AppError {
    /// `window` or `document` is missing.
    #[error("DOM unavailable: {0}")]
    NoDom(&'static str),

    /// An expected element is not in the document.
    #[error("Element '{0}' not found")]
    MissingElement(String),

    /// A JavaScript call threw.
    #[error("{context}: {message}")]
    Js {
        /// What was being attempted.
        context: &'static str,
        /// Stringified exception.
        message: String,
    },

    /// Game logic rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Poster drawing or export failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Attach context to `Result<T, JsValue>`.
pub(crate) trait JsResultExt<T> {
    fn js_context(self, context: &'static str) -> AppResult<T>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|value| AppError::Js {
            context,
            message: describe(&value),
        })
    }
}
