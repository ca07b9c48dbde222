//! DOM helpers and a typed element builder.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Event, EventTarget, HtmlElement, Window};

use crate::error::{AppError, AppResult, JsResultExt};

/// The global `window`.
pub fn window() -> AppResult<Window> {
    web_sys::window().ok_or(AppError::NoDom("window"))
}

/// The page document.
pub fn document() -> AppResult<Document> {
    window()?.document().ok_or(AppError::NoDom("document"))
}

/// Element by id, cast to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> AppResult<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| AppError::MissingElement(id.to_string()))
}

/// Add `class` when `on`, remove it otherwise.
pub fn set_class(element: &HtmlElement, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(err) = result {
        tracing::warn!("class '{class}' toggle failed: {err:?}");
    }
}

/// Register `handler` for `event` on `target` for the life of the page.
pub fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> AppResult<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .js_context("addEventListener")?;
    closure.forget();
    Ok(())
}

type Listener = (&'static str, Box<dyn FnMut(Event)>);

/// Builder for an [`HtmlElement`] with its id, classes, attributes, inline
/// styles, text or markup, dataset entries and listeners.
///
/// ```ignore
/// let button = ElementBuilder::new("button")
///     .class("next-btn")
///     .text("下一步")
///     .on("click", move |_| advance())
///     .build(&document)?;
/// ```
#[derive(Default)]
pub struct ElementBuilder {
    tag: &'static str,
    id: Option<String>,
    class: Option<String>,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    html: Option<String>,
    dataset: Vec<(String, String)>,
    listeners: Vec<Listener>,
}

impl ElementBuilder {
    /// Start an element of `tag`.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// Set the id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the full class attribute.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set an inline style property (CSS name, e.g. `background-size`).
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the inner HTML. Applied after `text`.
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set a `data-*` entry (camelCase key, as in `element.dataset`).
    #[must_use]
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.push((key.into(), value.into()));
        self
    }

    /// Attach an event listener.
    #[must_use]
    pub fn on(mut self, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        self.listeners.push((event, Box::new(handler)));
        self
    }

    /// Create the element in `document`.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be created or a property is
    /// rejected.
    pub fn build(self, document: &Document) -> AppResult<HtmlElement> {
        let element = document
            .create_element(self.tag)
            .js_context("createElement")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| AppError::Js {
                context: "createElement",
                message: format!("<{}> is not an HtmlElement", self.tag),
            })?;

        if let Some(id) = &self.id {
            element.set_id(id);
        }
        for (name, value) in &self.attrs {
            element.set_attribute(name, value).js_context("setAttribute")?;
        }
        let style = element.style();
        for (property, value) in &self.styles {
            style
                .set_property(property, value)
                .js_context("style.setProperty")?;
        }
        if let Some(class) = &self.class {
            element.set_class_name(class);
        }
        if let Some(text) = &self.text {
            element.set_text_content(Some(text));
        }
        if let Some(html) = &self.html {
            element.set_inner_html(html);
        }
        let dataset = element.dataset();
        for (key, value) in &self.dataset {
            dataset.set(key, value).js_context("dataset")?;
        }
        for (event, handler) in self.listeners {
            listen(&element, event, handler)?;
        }
        Ok(element)
    }
}
