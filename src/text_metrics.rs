//! Text measurement utilities.
//!
//! Label boxes are estimated from font metrics rather than measured glyph by
//! glyph. Hit-testing and painting both go through these numbers, so the box
//! a user can grab is the box that was drawn.

/// Metrics for a specific font/size combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Font size in display pixels
    pub size: f64,
    /// Average character width as a ratio of font size (typically 0.5-0.6 for proportional fonts)
    pub char_width_ratio: f64,
    /// Line height as a ratio of font size (typically 1.2-1.5)
    pub line_height_ratio: f64,
}

impl TextMetrics {
    /// Default metrics for a monospace UI font.
    pub const MONO: TextMetrics = TextMetrics {
        size: 16.0,
        char_width_ratio: 0.6,
        line_height_ratio: 1.2,
    };

    /// Create metrics for a specific font size.
    pub fn new(size: f64) -> Self {
        Self { size, ..Self::MONO }
    }

    /// Create metrics with custom ratios.
    pub fn custom(size: f64, char_width_ratio: f64, line_height_ratio: f64) -> Self {
        Self {
            size,
            char_width_ratio,
            line_height_ratio,
        }
    }

    /// Estimate the width of a single line of text.
    pub fn line_width(&self, text: &str) -> f64 {
        let char_count = text.chars().count() as f64;
        char_count * self.size * self.char_width_ratio
    }

    /// Get the line height.
    pub fn line_height(&self) -> f64 {
        self.size * self.line_height_ratio
    }

    /// Distance from the baseline to the top of the line box.
    pub fn ascent(&self) -> f64 {
        self.size
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::MONO
    }
}
