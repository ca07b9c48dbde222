//! Poster screen: Canvas2D backend, poster generation and saving.

use std::{cell::RefCell, f64::consts::TAU, rc::Rc};

use cp_core::{ElementCatalog, ElementId, GameConfig};
use cp_renderer::{
    canvas_size, ExportSettings, PosterBackend, PosterRenderer, RenderError, RenderResult,
    TextStyle,
};
use rand::{rngs::SmallRng, SeedableRng};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement,
};

use crate::dom::{self, by_id, listen, ElementBuilder};
use crate::error::{describe, AppError, AppResult, JsResultExt};
use crate::platform::{Platform, SaveMode};
use crate::screens::{POSTER_CANVAS_ID, SAVE_BUTTON_ID};

fn draw_error(what: &str, err: &JsValue) -> RenderError {
    RenderError::Draw(format!("{what}: {}", describe(err)))
}

/// [`PosterBackend`] over a browser `<canvas>`.
pub struct CanvasBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasBackend {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextUnavailable`] if the browser refuses a
    /// 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> RenderResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| RenderError::ContextUnavailable(describe(&err)))?
            .ok_or_else(|| RenderError::ContextUnavailable("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::ContextUnavailable("not a 2d context".to_string()))?;
        Ok(Self { canvas, ctx })
    }

    /// Set the canvas pixel size.
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Encode the canvas as a data URI.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Export`] if the browser cannot encode it.
    pub fn to_data_uri(&self, settings: &ExportSettings) -> RenderResult<String> {
        let uri = self
            .canvas
            .to_data_url_with_type_and_encoder_options(
                settings.format.mime(),
                &JsValue::from_f64(settings.encoder_quality()),
            )
            .map_err(|err| RenderError::Export(describe(&err)))?;
        if !settings.is_expected_data_uri(&uri) {
            tracing::warn!("Browser fell back to another image format");
        }
        Ok(uri)
    }

    fn apply_text_style(&self, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline(style.baseline.as_str());
    }
}

impl PosterBackend for CanvasBackend {
    fn size(&self) -> (f64, f64) {
        (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_vertical_gradient(&mut self, top: &str, bottom: &str) -> RenderResult<()> {
        let (width, height) = self.size();
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        gradient
            .add_color_stop(0.0, top)
            .map_err(|err| draw_error("gradient stop", &err))?;
        gradient
            .add_color_stop(1.0, bottom)
            .map_err(|err| draw_error("gradient stop", &err))?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) -> RenderResult<()> {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx
            .arc(cx, cy, radius, 0.0, TAU)
            .map_err(|err| draw_error("arc", &err))?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult<()> {
        self.apply_text_style(style);
        self.ctx
            .fill_text(text, x, y)
            .map_err(|err| draw_error("fillText", &err))
    }

    fn measure_text(&self, text: &str, font: &str) -> f64 {
        self.ctx.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(err) => {
                tracing::warn!("measureText failed: {err:?}");
                0.0
            }
        }
    }
}

/// Poster screen bound to its container.
pub struct PosterView {
    backend: RefCell<CanvasBackend>,
    renderer: PosterRenderer,
    export: ExportSettings,
    catalog: ElementCatalog,
    platform: Platform,
    document: Document,
    container: HtmlElement,
    rng: RefCell<SmallRng>,
}

impl PosterView {
    /// Size the poster canvas for the viewport and wire the save button.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas or save button is missing, or the
    /// canvas has no 2D context.
    pub fn mount(
        document: &Document,
        container: &HtmlElement,
        config: &GameConfig,
        platform: Platform,
    ) -> AppResult<Rc<Self>> {
        let canvas: HtmlCanvasElement = by_id(document, POSTER_CANVAS_ID)?;
        let backend = CanvasBackend::new(canvas.clone())?;

        let viewport = dom::window()?
            .inner_width()
            .js_context("innerWidth")?
            .as_f64()
            .unwrap_or_default();
        let (width, height) = canvas_size(viewport);
        backend.resize(width, height);
        tracing::debug!("Poster canvas {width}x{height} for viewport {viewport}");

        let style = canvas.style();
        for (property, value) in [
            ("display", "block"),
            ("margin", "20px auto"),
            ("box-shadow", "0 4px 12px rgba(0,0,0,0.15)"),
        ] {
            style
                .set_property(property, value)
                .js_context("style.setProperty")?;
        }

        // Only the decorative dots draw from this.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;

        let view = Rc::new(Self {
            backend: RefCell::new(backend),
            renderer: PosterRenderer::default(),
            export: ExportSettings::default(),
            catalog: config.catalog.clone(),
            platform,
            document: document.clone(),
            container: container.clone(),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        });

        let save_button: HtmlElement = by_id(document, SAVE_BUTTON_ID)?;
        let handle = Rc::clone(&view);
        listen(&save_button, "click", move |_| {
            if let Err(err) = handle.save() {
                tracing::error!("Saving poster failed: {err}");
            }
        })?;

        Ok(view)
    }

    /// Draw the poster for a matched pair.
    ///
    /// # Errors
    ///
    /// Returns an error if a drawing call is rejected.
    pub fn generate(&self, first: ElementId, second: ElementId) -> AppResult<()> {
        let data = self.catalog.poster_data(first, second);
        let mut backend = self.backend.borrow_mut();
        let mut rng = self.rng.borrow_mut();
        self.renderer.render(&mut *backend, &data, &mut *rng)?;
        tracing::info!("Poster generated for {first} + {second}");
        Ok(())
    }

    /// Save the current poster the way the host platform allows.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the page cannot be updated.
    pub fn save(&self) -> AppResult<()> {
        let uri = self.backend.borrow().to_data_uri(&self.export)?;
        match self.platform.save_mode() {
            SaveMode::Download => self.download(&uri),
            SaveMode::LongPress => self.show_for_long_press(&uri),
        }
    }

    fn download(&self, uri: &str) -> AppResult<()> {
        let body = self.document.body().ok_or(AppError::NoDom("body"))?;
        let link = self
            .document
            .create_element("a")
            .js_context("createElement")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| AppError::Js {
                context: "createElement",
                message: "<a> is not an anchor".to_string(),
            })?;
        link.set_download(&self.export.file_name());
        link.set_href(uri);

        body.append_child(&link).js_context("appendChild")?;
        link.click();
        link.remove();

        dom::window()?
            .alert_with_message(&self.export.saved_notice)
            .js_context("alert")?;
        tracing::info!("Poster downloaded as {}", self.export.file_name());
        Ok(())
    }

    fn show_for_long_press(&self, uri: &str) -> AppResult<()> {
        let overlay = ElementBuilder::new("div")
            .class("poster-preview")
            .style("position", "fixed")
            .style("inset", "0")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("align-items", "center")
            .style("justify-content", "center")
            .style("background", "rgba(0,0,0,0.8)")
            .style("z-index", "1000")
            .build(&self.document)?;
        let image = ElementBuilder::new("img")
            .attr("src", uri)
            .attr("alt", self.export.file_stem.as_str())
            .style("max-width", "90%")
            .style("max-height", "80%")
            .build(&self.document)?;
        let hint = ElementBuilder::new("p")
            .text("长按图片保存到相册")
            .style("color", "#fff")
            .build(&self.document)?;

        overlay.append_child(&image).js_context("appendChild")?;
        overlay.append_child(&hint).js_context("appendChild")?;
        let closing = overlay.clone();
        listen(&overlay, "click", move |_| closing.remove())?;
        self.container
            .append_child(&overlay)
            .js_context("appendChild")?;
        tracing::info!("Poster shown for long-press saving");
        Ok(())
    }
}
