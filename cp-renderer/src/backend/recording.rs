//! Headless backend that records draw calls.
//!
//! Text width is estimated from the font size: CJK and other wide glyphs
//! take one em, ASCII takes a bit over half. Good enough to exercise the
//! wrapping logic without a font rasteriser.

use super::{PosterBackend, TextStyle};
use crate::RenderResult;

/// Width of an ASCII glyph as a fraction of the font size.
const ASCII_ADVANCE: f64 = 0.55;

/// Font size assumed when a font string carries none.
const DEFAULT_FONT_PX: f64 = 10.0;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Surface cleared.
    Clear,
    /// Full-surface vertical gradient.
    Gradient {
        /// Top colour stop.
        top: String,
        /// Bottom colour stop.
        bottom: String,
    },
    /// Filled rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        color: String,
    },
    /// Filled circle.
    Circle {
        /// Centre x.
        cx: f64,
        /// Centre y.
        cy: f64,
        /// Radius.
        radius: f64,
        /// Fill colour.
        color: String,
    },
    /// Stroked line.
    Line {
        /// Start point.
        from: (f64, f64),
        /// End point.
        to: (f64, f64),
        /// Stroke colour.
        color: String,
        /// Stroke width.
        width: f64,
    },
    /// Text draw.
    Text {
        /// Text content.
        text: String,
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// Style used.
        style: TextStyle,
    },
}

/// Backend that keeps every call in order for later inspection.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingBackend {
    /// Create a recorder for a surface of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All recorded calls.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text draws in order, as `(text, x, y)`.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    /// Circles in order.
    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    fn record(&mut self, op: DrawOp) {
        tracing::trace!("Record {op:?}");
        self.ops.push(op);
    }
}

/// Pixel size from a CSS font shorthand such as `bold 24px "PingFang SC"`.
fn font_px(font: &str) -> f64 {
    font.split_whitespace()
        .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
        .unwrap_or(DEFAULT_FONT_PX)
}

/// Estimated advance of `text` at `px` pixels.
#[must_use]
pub fn estimate_width(text: &str, px: f64) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { px * ASCII_ADVANCE } else { px })
        .sum()
}

impl PosterBackend for RecordingBackend {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.record(DrawOp::Clear);
    }

    fn fill_vertical_gradient(&mut self, top: &str, bottom: &str) -> RenderResult<()> {
        self.record(DrawOp::Gradient {
            top: top.to_string(),
            bottom: bottom.to_string(),
        });
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.record(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) -> RenderResult<()> {
        self.record(DrawOp::Circle {
            cx,
            cy,
            radius,
            color: color.to_string(),
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        self.record(DrawOp::Line {
            from,
            to,
            color: color.to_string(),
            width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult<()> {
        self.record(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, font: &str) -> f64 {
        estimate_width(text, font_px(font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_px_reads_size_token() {
        assert!((font_px("bold 24px \"PingFang SC\"") - 24.0).abs() < f64::EPSILON);
        assert!((font_px("16px sans-serif") - 16.0).abs() < f64::EPSILON);
        assert!((font_px("serif") - DEFAULT_FONT_PX).abs() < f64::EPSILON);
    }

    #[test]
    fn cjk_glyphs_are_one_em() {
        let backend = RecordingBackend::new(100.0, 100.0);
        let width = backend.measure_text("甜蜜", "20px serif");
        assert!((width - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn records_in_call_order() {
        let mut backend = RecordingBackend::new(10.0, 10.0);
        backend.clear();
        backend.fill_rect(0.0, 0.0, 1.0, 1.0, "#fff");
        assert_eq!(backend.ops().len(), 2);
        assert_eq!(backend.ops()[0], DrawOp::Clear);
    }
}
