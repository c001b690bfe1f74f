use serde::{Deserialize, Serialize};

/// Static text printed on every report. Defaults reproduce the production
/// DermAssist branding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub branding: Branding,
    pub model: ModelInfo,
    /// Footer disclaimer. `**bold**` segments are emphasized by renderers
    /// that support it.
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    /// Website and support address line under the tagline.
    pub contact: String,
    /// Document title recorded in the output metadata.
    pub document_title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub name: String,
    /// Inference runtime and input size (e.g. "TFLite · 128×128").
    pub runtime: String,
    /// Class set description for the footer.
    pub classes: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            branding: Branding::default(),
            model: ModelInfo::default(),
            disclaimer: "This report is generated by an AI model for **screening purposes only** \
                         and does **NOT** constitute a medical diagnosis. Always consult a \
                         qualified dermatologist or healthcare professional."
                .to_string(),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "DermAssist AI".to_string(),
            tagline: "AI-Based Skin Lesion Screening Platform".to_string(),
            contact: "www.dermassist.ai  |  support@dermassist.ai".to_string(),
            document_title: "DermAssist AI Screening Report".to_string(),
            author: "DermAssist AI Platform".to_string(),
        }
    }
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            name: "DermAssist v2.0".to_string(),
            runtime: "TFLite · 128×128".to_string(),
            classes: "7 (HAM10000)".to_string(),
        }
    }
}
