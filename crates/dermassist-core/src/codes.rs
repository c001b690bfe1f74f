use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the seven HAM10000 lesion classes the screening model predicts.
///
/// Variant order is the canonical order used to break ties between equal
/// scores: `mel, bcc, akiec, bkl, df, vasc, nv`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ClassCode {
    Mel,
    Bcc,
    Akiec,
    Bkl,
    Df,
    Vasc,
    Nv,
}

/// Coarse severity bucket derived from a class code. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    High,
    Moderate,
    Low,
    Unknown,
}

struct ClassInfo {
    code: ClassCode,
    symbol: &'static str,
    name: &'static str,
    tier: RiskTier,
    description: &'static str,
}

// Indexed by `ClassCode as usize`.
static CLASS_TABLE: [ClassInfo; 7] = [
    ClassInfo {
        code: ClassCode::Mel,
        symbol: "mel",
        name: "Melanoma",
        tier: RiskTier::High,
        description: "Melanoma is the most serious form of skin cancer arising from melanocytes. \
            It can spread rapidly to other organs if not caught early. Immediate specialist \
            evaluation is critical.",
    },
    ClassInfo {
        code: ClassCode::Bcc,
        symbol: "bcc",
        name: "Basal Cell Carcinoma",
        tier: RiskTier::High,
        description: "Basal Cell Carcinoma is the most common skin cancer. While it rarely \
            metastasizes, it can cause local tissue destruction. Early treatment yields \
            excellent outcomes.",
    },
    ClassInfo {
        code: ClassCode::Akiec,
        symbol: "akiec",
        name: "Actinic Keratosis",
        tier: RiskTier::High,
        description: "Actinic Keratosis is a precancerous rough patch caused by prolonged sun \
            exposure. Without treatment, a small percentage can progress to squamous cell \
            carcinoma.",
    },
    ClassInfo {
        code: ClassCode::Bkl,
        symbol: "bkl",
        name: "Benign Keratosis",
        tier: RiskTier::Moderate,
        description: "Benign Keratosis (seborrheic keratosis) is a non-cancerous skin growth \
            common with aging. It typically requires no treatment unless causing discomfort.",
    },
    ClassInfo {
        code: ClassCode::Df,
        symbol: "df",
        name: "Dermatofibroma",
        tier: RiskTier::Moderate,
        description: "Dermatofibroma is a common benign fibrous nodule usually found on the \
            legs. It is harmless and generally needs no treatment unless symptomatic.",
    },
    ClassInfo {
        code: ClassCode::Vasc,
        symbol: "vasc",
        name: "Vascular Lesion",
        tier: RiskTier::Moderate,
        description: "Vascular Lesion refers to abnormalities of skin blood vessels such as \
            hemangiomas. Most are benign but warrant evaluation by a dermatologist.",
    },
    ClassInfo {
        code: ClassCode::Nv,
        symbol: "nv",
        name: "Melanocytic Nevi",
        tier: RiskTier::Low,
        description: "Melanocytic Nevi (common moles) are benign pigmented growths. Most are \
            harmless — however, changes in size, shape or color should be evaluated promptly.",
    },
];

impl ClassCode {
    /// All codes in canonical tie-break order.
    pub const ALL: [ClassCode; 7] = [
        ClassCode::Mel,
        ClassCode::Bcc,
        ClassCode::Akiec,
        ClassCode::Bkl,
        ClassCode::Df,
        ClassCode::Vasc,
        ClassCode::Nv,
    ];

    /// Look up a code by its lowercase symbol. Matching is exact.
    pub fn from_code(code: &str) -> Option<Self> {
        CLASS_TABLE.iter().find(|c| c.symbol == code).map(|c| c.code)
    }

    fn info(self) -> &'static ClassInfo {
        &CLASS_TABLE[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.info().symbol
    }

    pub fn display_name(self) -> &'static str {
        self.info().name
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn risk_tier(self) -> RiskTier {
        self.info().tier
    }

    /// Position in the canonical order, 0 for `mel` through 6 for `nv`.
    pub fn canonical_rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl RiskTier {
    /// Label used in the primary-result panel (e.g. "High Risk").
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::Low => "Low Risk",
            RiskTier::Unknown => "Unknown",
        }
    }

    /// Label used in the differential table's RISK column.
    pub fn short_label(self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Moderate => "Moderate",
            RiskTier::Low => "Low",
            RiskTier::Unknown => "Unknown",
        }
    }

    /// Recommended action for a primary diagnosis in this tier.
    /// Empty for [`RiskTier::Unknown`].
    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::High => {
                "Seek immediate dermatological consultation within 3–5 business days. \
                 Do NOT delay — early detection significantly improves outcomes for \
                 high-risk lesions."
            }
            RiskTier::Moderate => {
                "Schedule a dermatology appointment within the next 2–4 weeks. \
                 A board-certified dermatologist should inspect and potentially biopsy \
                 the lesion."
            }
            RiskTier::Low => {
                "No immediate action required. Perform regular monthly skin \
                 self-examinations. Apply broad-spectrum SPF 30+ sunscreen daily and \
                 avoid prolonged sun exposure."
            }
            RiskTier::Unknown => "",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier for a raw label. Anything outside the seven known codes is
/// [`RiskTier::Unknown`].
pub fn classify(code: &str) -> RiskTier {
    ClassCode::from_code(code).map_or(RiskTier::Unknown, ClassCode::risk_tier)
}

/// Display name for a raw label, falling back to the label itself.
pub fn display_name(code: &str) -> &str {
    match ClassCode::from_code(code) {
        Some(class) => class.display_name(),
        None => code,
    }
}

/// Description prose for a raw label, empty when the code is unknown.
pub fn description(code: &str) -> &'static str {
    ClassCode::from_code(code).map_or("", ClassCode::description)
}
