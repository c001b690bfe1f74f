use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use dermassist_core::{ClassCode, RiskTier, ScoreMap};

use crate::visual;

/// One row of the differential diagnosis: a class and its raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DifferentialEntry {
    pub class_code: ClassCode,
    pub display_name: String,
    pub risk_tier: RiskTier,
    /// Raw model score, untouched.
    pub score: f64,
    /// `score * 100` rounded to one decimal place.
    pub score_percent: f64,
    /// True only for the class the model chose as its prediction.
    pub is_primary: bool,
    pub bar_fraction: f64,
}

/// Rank all seven classes by raw score, highest first.
///
/// Equal scores fall back to the canonical code order, so identical input
/// always yields the same sequence. `is_primary` follows `predicted_label`
/// and is independent of rank: the model's pick may sit anywhere in the list,
/// or nowhere if the label is not one of the seven codes.
pub fn rank(scores: &ScoreMap, predicted_label: &str) -> Vec<DifferentialEntry> {
    let primary = ClassCode::from_code(predicted_label);

    let mut entries: Vec<DifferentialEntry> = ClassCode::ALL
        .iter()
        .map(|&code| {
            let score = scores.get(code);
            DifferentialEntry {
                class_code: code,
                display_name: code.display_name().to_string(),
                risk_tier: code.risk_tier(),
                score,
                score_percent: score_percent(score),
                is_primary: primary == Some(code),
                bar_fraction: visual::bar_fraction(score),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.class_code
                    .canonical_rank()
                    .cmp(&b.class_code.canonical_rank())
            })
    });

    entries
}

/// Scale a probability to a percentage with one decimal place.
///
/// Rounds the same way `{:.1}` formatting does, so a score and a confidence
/// of equal value always print the same.
pub fn score_percent(score: f64) -> f64 {
    format!("{:.1}", score * 100.0).parse().unwrap_or(0.0)
}
