use serde::{Deserialize, Serialize};

/// Document styling for the exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Times New Roman", "Calibri").
    pub body_font: String,

    /// Font for headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,

    /// Page margin in inches (applied uniformly).
    pub margin_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 12,
            heading1_size: 16,
            heading2_size: 14,
            heading3_size: 12,
            margin_inches: 1.0,
        }
    }
}

impl DocumentStyles {
    /// Margin in twentieths of a point, as OOXML page margins expect.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_inches * 1440.0).round() as i32
    }
}
