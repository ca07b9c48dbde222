//! Poster surface sizing.

/// Widest poster in CSS pixels.
pub const MAX_POSTER_WIDTH: f64 = 750.0;

/// Fraction of the viewport width the poster takes.
pub const VIEWPORT_FRACTION: f64 = 0.9;

/// Height to width ratio.
pub const ASPECT: f64 = 1.5;

/// Canvas size `(width, height)` for a viewport of `viewport_width` pixels.
///
/// Canvas dimensions are whole pixels; fractional values truncate the same
/// way assigning to `canvas.width` does.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn canvas_size(viewport_width: f64) -> (u32, u32) {
    let width = (viewport_width * VIEWPORT_FRACTION)
        .min(MAX_POSTER_WIDTH)
        .max(0.0) as u32;
    let height = (f64::from(width) * ASPECT) as u32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_scales() {
        assert_eq!(canvas_size(400.0), (360, 540));
    }

    #[test]
    fn wide_viewport_caps_at_max() {
        assert_eq!(canvas_size(1920.0), (750, 1125));
    }

    #[test]
    fn fractional_width_truncates() {
        // 375 * 0.9 = 337.5
        assert_eq!(canvas_size(375.0), (337, 505));
    }
}
