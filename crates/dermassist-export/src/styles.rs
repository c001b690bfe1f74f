use serde::{Deserialize, Serialize};

use dermassist_report::document::TextSize;

/// Typesetting configuration shared by the DOCX and PDF renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Helvetica", "Calibri").
    pub body_font: String,

    /// Font for headings.
    pub heading_font: String,

    /// Point size for each semantic text size.
    pub sizes: TextSizes,

    /// Page margin in millimetres (applied uniformly).
    pub margin_mm: f32,

    pub page_width_mm: f32,

    pub page_height_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSizes {
    pub display: f32,
    pub title: f32,
    pub lead: f32,
    pub emphasis: f32,
    pub heading: f32,
    pub large: f32,
    pub body: f32,
    pub small: f32,
    pub caption: f32,
}

impl DocumentStyles {
    pub fn size_pt(&self, size: TextSize) -> f32 {
        let s = &self.sizes;
        match size {
            TextSize::Display => s.display,
            TextSize::Title => s.title,
            TextSize::Lead => s.lead,
            TextSize::Emphasis => s.emphasis,
            TextSize::Heading => s.heading,
            TextSize::Large => s.large,
            TextSize::Body => s.body,
            TextSize::Small => s.small,
            TextSize::Caption => s.caption,
        }
    }

    /// Printable width between the margins.
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Helvetica".to_string(),
            heading_font: "Helvetica".to_string(),
            sizes: TextSizes::default(),
            margin_mm: 18.0,
            // A4
            page_width_mm: 210.0,
            page_height_mm: 297.0,
        }
    }
}

impl Default for TextSizes {
    fn default() -> Self {
        Self {
            display: 36.0,
            title: 20.0,
            lead: 17.0,
            emphasis: 14.0,
            heading: 11.0,
            large: 10.0,
            body: 9.0,
            small: 8.0,
            caption: 7.0,
        }
    }
}
