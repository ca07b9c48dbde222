//! Drawing backends.

pub mod recording;

use crate::RenderResult;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Anchor at the left edge.
    Left,
    /// Anchor at the centre.
    Center,
}

impl TextAlign {
    /// Canvas `textAlign` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// Vertical middle of the em box.
    Middle,
}

impl TextBaseline {
    /// Canvas `textBaseline` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Middle => "middle",
        }
    }
}

/// Font, colour and anchoring for a text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `bold 24px "PingFang SC"`.
    pub font: String,
    /// CSS colour.
    pub color: String,
    /// Horizontal anchor.
    pub align: TextAlign,
    /// Vertical anchor.
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Centre-aligned text on the alphabetic baseline.
    #[must_use]
    pub fn centered(font: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            color: color.into(),
            align: TextAlign::Center,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Same style with a different anchor pair.
    #[must_use]
    pub fn anchored(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }
}

/// The 2D primitives the poster layout needs.
///
/// Mirrors the subset of `CanvasRenderingContext2D` the poster uses. Calls
/// that the browser can reject return a [`RenderResult`].
pub trait PosterBackend {
    /// Surface size in pixels (width, height).
    fn size(&self) -> (f64, f64);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill the whole surface with a top-to-bottom linear gradient.
    ///
    /// # Errors
    ///
    /// Returns an error if a colour stop is rejected.
    fn fill_vertical_gradient(&mut self, top: &str, bottom: &str) -> RenderResult<()>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Fill a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc is rejected.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) -> RenderResult<()>;

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);

    /// Draw a single line of text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text draw is rejected.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult<()>;

    /// Rendered width of `text` in `font`.
    fn measure_text(&self, text: &str, font: &str) -> f64;
}
