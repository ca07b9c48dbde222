//! Poster layout.
//!
//! Draw order is fixed: background, title, element badges, reaction, usage
//! text, share marker. All positions are derived from the surface size so
//! the same layout fits any canvas the app creates.
//!
//! The title sits on the alphabetic baseline. Everything from the badges
//! down is anchored on the middle baseline.

use cp_core::PosterData;
use rand::Rng;

use crate::backend::{PosterBackend, TextAlign, TextBaseline, TextStyle};
use crate::wrap::wrap_text;
use crate::RenderResult;

const FONT_FAMILY: &str = "\"PingFang SC\"";

fn font(weight: Option<&str>, px: u32) -> String {
    match weight {
        Some(weight) => format!("{weight} {px}px {FONT_FAMILY}"),
        None => format!("{px}px {FONT_FAMILY}"),
    }
}

/// Colours, texts and layout constants for the poster.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterConfig {
    /// Gradient colour at the top edge.
    pub gradient_top: String,
    /// Gradient colour at the bottom edge.
    pub gradient_bottom: String,
    /// Number of decorative dots.
    pub dot_count: usize,
    /// Dot radius range `[min, max)`.
    pub dot_radius: (f64, f64),
    /// Dot fill.
    pub dot_color: String,

    /// Headline text.
    pub title: String,
    /// Headline font.
    pub title_font: String,
    /// Accent colour for headline and usage heading.
    pub accent_color: String,
    /// Headline baseline.
    pub title_y: f64,

    /// Badge fills, cycled by element index.
    pub badge_colors: Vec<String>,
    /// Badge radius.
    pub badge_radius: f64,
    /// Horizontal distance between badge centres.
    pub badge_spacing: f64,
    /// Badge centre y.
    pub badge_y: f64,
    /// Badge label font.
    pub badge_font: String,
    /// Badge label colour.
    pub badge_text_color: String,
    /// Font of the `+` between badges.
    pub separator_font: String,

    /// Body text colour.
    pub ink_color: String,
    /// Reaction font.
    pub reaction_font: String,
    /// Reaction text y.
    pub reaction_y: f64,
    /// Connector line y.
    pub connector_y: f64,
    /// Connector half length.
    pub connector_half_width: f64,

    /// Usage heading text.
    pub usage_heading: String,
    /// Usage heading font.
    pub usage_heading_font: String,
    /// Usage heading y.
    pub usage_heading_y: f64,
    /// Usage item font.
    pub usage_font: String,
    /// First usage line y.
    pub usage_top: f64,
    /// Distance between wrapped lines.
    pub line_height: f64,
    /// Extra space after each usage item.
    pub paragraph_gap: f64,
    /// Left margin, also half the horizontal padding of the wrap budget.
    pub margin: f64,

    /// Share marker edge length.
    pub share_size: f64,
    /// Share marker distance from the bottom-right corner.
    pub share_inset: f64,
    /// Share marker fill.
    pub share_color: String,
    /// Caption under the share marker.
    pub share_caption: String,
    /// Caption font.
    pub share_caption_font: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            gradient_top: "#ffecd2".to_string(),
            gradient_bottom: "#fcb69f".to_string(),
            dot_count: 20,
            dot_radius: (2.0, 7.0),
            dot_color: "rgba(255, 255, 255, 0.2)".to_string(),

            title: "你们的化学CP诞生了！".to_string(),
            title_font: font(Some("bold"), 24),
            accent_color: "#d23669".to_string(),
            title_y: 50.0,

            badge_colors: vec!["#ff9a9e".to_string(), "#a6c1ee".to_string()],
            badge_radius: 30.0,
            badge_spacing: 80.0,
            badge_y: 100.0,
            badge_font: font(Some("bold"), 24),
            badge_text_color: "#fff".to_string(),
            separator_font: font(Some("bold"), 20),

            ink_color: "#333".to_string(),
            reaction_font: font(None, 20),
            reaction_y: 180.0,
            connector_y: 170.0,
            connector_half_width: 30.0,

            usage_heading: "甜蜜用途".to_string(),
            usage_heading_font: font(Some("bold"), 20),
            usage_heading_y: 230.0,
            usage_font: font(None, 16),
            usage_top: 260.0,
            line_height: 25.0,
            paragraph_gap: 10.0,
            margin: 20.0,

            share_size: 80.0,
            share_inset: 20.0,
            share_color: "#fff".to_string(),
            share_caption: "扫码分享".to_string(),
            share_caption_font: font(None, 12),
        }
    }
}

/// Draws [`PosterData`] onto a [`PosterBackend`].
#[derive(Debug, Clone, Default)]
pub struct PosterRenderer {
    config: PosterConfig,
}

impl PosterRenderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: PosterConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Draw the full poster.
    ///
    /// `rng` only places the decorative dots.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the backend.
    pub fn render<B, R>(&self, backend: &mut B, data: &PosterData, rng: &mut R) -> RenderResult<()>
    where
        B: PosterBackend + ?Sized,
        R: Rng + ?Sized,
    {
        let (width, height) = backend.size();
        tracing::debug!(
            "Render poster {width}x{height}: {:?} / {}",
            data.elements,
            data.reaction
        );

        backend.clear();
        self.draw_background(backend, rng)?;
        self.draw_title(backend)?;
        self.draw_elements(backend, &data.elements)?;
        self.draw_reaction(backend, &data.reaction)?;
        self.draw_usage(backend, &data.usage)?;
        self.draw_share_marker(backend)
    }

    fn draw_background<B, R>(&self, backend: &mut B, rng: &mut R) -> RenderResult<()>
    where
        B: PosterBackend + ?Sized,
        R: Rng + ?Sized,
    {
        let c = &self.config;
        let (width, height) = backend.size();
        backend.fill_vertical_gradient(&c.gradient_top, &c.gradient_bottom)?;

        let (min_r, max_r) = c.dot_radius;
        for _ in 0..c.dot_count {
            let x = rng.gen::<f64>() * width;
            let y = rng.gen::<f64>() * height;
            let r = min_r + rng.gen::<f64>() * (max_r - min_r);
            backend.fill_circle(x, y, r, &c.dot_color)?;
        }
        Ok(())
    }

    fn draw_title<B: PosterBackend + ?Sized>(&self, backend: &mut B) -> RenderResult<()> {
        let c = &self.config;
        let (width, _) = backend.size();
        let style = TextStyle::centered(c.title_font.clone(), c.accent_color.clone());
        backend.fill_text(&c.title, width / 2.0, c.title_y, &style)
    }

    fn draw_elements<B: PosterBackend + ?Sized>(
        &self,
        backend: &mut B,
        labels: &[String],
    ) -> RenderResult<()> {
        let c = &self.config;
        let (width, _) = backend.size();
        let center_x = width / 2.0;
        let label_style = TextStyle::centered(c.badge_font.clone(), c.badge_text_color.clone())
            .anchored(TextAlign::Center, TextBaseline::Middle);
        let plus_style = TextStyle::centered(c.separator_font.clone(), c.ink_color.clone())
            .anchored(TextAlign::Center, TextBaseline::Middle);

        for (i, label) in labels.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = center_x - c.badge_spacing + i as f64 * c.badge_spacing;
            let fill = c
                .badge_colors
                .get(i % c.badge_colors.len().max(1))
                .map_or("#ccc", String::as_str);

            backend.fill_circle(x, c.badge_y, c.badge_radius, fill)?;
            backend.fill_text(label, x, c.badge_y, &label_style)?;

            if i + 1 < labels.len() {
                backend.fill_text("+", x + c.badge_spacing / 2.0, c.badge_y, &plus_style)?;
            }
        }
        Ok(())
    }

    fn draw_reaction<B: PosterBackend + ?Sized>(
        &self,
        backend: &mut B,
        reaction: &str,
    ) -> RenderResult<()> {
        let c = &self.config;
        let (width, _) = backend.size();
        let center_x = width / 2.0;

        let style = TextStyle::centered(c.reaction_font.clone(), c.ink_color.clone())
            .anchored(TextAlign::Center, TextBaseline::Middle);
        backend.fill_text(reaction, center_x, c.reaction_y, &style)?;
        backend.stroke_line(
            (center_x - c.connector_half_width, c.connector_y),
            (center_x + c.connector_half_width, c.connector_y),
            &c.ink_color,
            2.0,
        );
        Ok(())
    }

    fn draw_usage<B: PosterBackend + ?Sized>(
        &self,
        backend: &mut B,
        usage: &[String],
    ) -> RenderResult<()> {
        let c = &self.config;
        let (width, _) = backend.size();

        let heading = TextStyle::centered(c.usage_heading_font.clone(), c.accent_color.clone())
            .anchored(TextAlign::Center, TextBaseline::Middle);
        backend.fill_text(&c.usage_heading, width / 2.0, c.usage_heading_y, &heading)?;

        let body = TextStyle::centered(c.usage_font.clone(), c.ink_color.clone())
            .anchored(TextAlign::Left, TextBaseline::Middle);
        let max_width = width - c.margin * 2.0;
        let mut y = c.usage_top;

        for item in usage {
            let lines = wrap_text(item, max_width, |line| backend.measure_text(line, &body.font));
            for line in &lines {
                backend.fill_text(line, c.margin, y, &body)?;
                y += c.line_height;
            }
            y += c.paragraph_gap;
        }
        Ok(())
    }

    fn draw_share_marker<B: PosterBackend + ?Sized>(&self, backend: &mut B) -> RenderResult<()> {
        let c = &self.config;
        let (width, height) = backend.size();
        let x = width - c.share_size - c.share_inset;
        let y = height - c.share_size - c.share_inset;

        backend.fill_rect(x, y, c.share_size, c.share_size, &c.share_color);
        let caption = TextStyle::centered(c.share_caption_font.clone(), c.ink_color.clone())
            .anchored(TextAlign::Center, TextBaseline::Middle);
        backend.fill_text(
            &c.share_caption,
            x + c.share_size / 2.0,
            y + c.share_size + 15.0,
            &caption,
        )
    }
}
