//! Poster export settings.
//!
//! The browser does the encoding (`canvas.toDataURL`); this module only
//! decides the format, quality and the name the download is saved under.

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
}

impl ExportFormat {
    /// MIME type passed to the encoder.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// How the finished poster is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Output format.
    pub format: ExportFormat,
    /// Encoder quality in `0.0..=1.0` (ignored for PNG).
    pub quality: f64,
    /// Download file name without extension.
    pub file_stem: String,
    /// Notice shown once the download has been triggered.
    pub saved_notice: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 0.9,
            file_stem: "化学CP海报".to_string(),
            saved_notice: "海报已保存到相册！".to_string(),
        }
    }
}

impl ExportSettings {
    /// Full download file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }

    /// Quality clamped to what the encoder accepts.
    #[must_use]
    pub fn encoder_quality(&self) -> f64 {
        self.quality.clamp(0.0, 1.0)
    }

    /// Whether `uri` is a data URI of the configured format.
    #[must_use]
    pub fn is_expected_data_uri(&self, uri: &str) -> bool {
        uri.strip_prefix("data:")
            .is_some_and(|rest| rest.starts_with(self.format.mime()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_jpeg_download() {
        let settings = ExportSettings::default();
        assert_eq!(settings.file_name(), "化学CP海报.jpg");
        assert_eq!(settings.format.mime(), "image/jpeg");
        assert!((settings.encoder_quality() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn data_uri_check_matches_format() {
        let settings = ExportSettings::default();
        assert!(settings.is_expected_data_uri("data:image/jpeg;base64,AAAA"));
        assert!(!settings.is_expected_data_uri("data:image/png;base64,AAAA"));
        assert!(!settings.is_expected_data_uri("image/jpeg"));
    }

    #[test]
    fn quality_is_clamped() {
        let settings = ExportSettings {
            quality: 3.0,
            ..ExportSettings::default()
        };
        assert!((settings.encoder_quality() - 1.0).abs() < f64::EPSILON);
    }
}
