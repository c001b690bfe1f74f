use dermassist_core::{ClassCode, RiskTier, ScoreMap};
use dermassist_report::assembler::format_confidence;
use dermassist_report::ranker::score_percent;
use dermassist_report::rank;
use serde_json::json;

fn scores(value: serde_json::Value) -> ScoreMap {
    ScoreMap::from_value(&value).unwrap()
}

fn order(entries: &[dermassist_report::DifferentialEntry]) -> Vec<&'static str> {
    entries.iter().map(|e| e.class_code.code()).collect()
}

#[test]
fn always_returns_all_seven_classes_once() {
    let inputs = [
        json!({}),
        json!({"mel": 0.9}),
        json!({"mel": 0.1, "bcc": 0.2, "akiec": 0.3, "bkl": 0.4, "df": 0.5, "vasc": 0.6, "nv": 0.7}),
        json!({"unknown": 1.0, "nv": "bad"}),
    ];
    for input in inputs {
        let entries = rank(&scores(input), "nv");
        assert_eq!(entries.len(), 7);
        let mut codes: Vec<_> = entries.iter().map(|e| e.class_code).collect();
        codes.sort();
        assert_eq!(codes, ClassCode::ALL);
    }
}

#[test]
fn sorts_descending_by_raw_score() {
    let entries = rank(
        &scores(json!({"mel": 0.05, "bcc": 0.1, "nv": 0.7, "bkl": 0.15})),
        "nv",
    );
    assert_eq!(order(&entries), ["nv", "bkl", "bcc", "mel", "akiec", "df", "vasc"]);
}

#[test]
fn ties_break_by_canonical_order() {
    let entries = rank(&scores(json!({"bcc": 0.5, "mel": 0.5})), "bcc");
    assert_eq!(order(&entries)[..2], ["mel", "bcc"]);
    // Remaining zero scores keep canonical order too.
    assert_eq!(order(&entries)[2..], ["akiec", "bkl", "df", "vasc", "nv"]);
}

#[test]
fn identical_input_ranks_identically() {
    let input = scores(json!({"df": 0.3, "vasc": 0.3, "nv": 0.3, "mel": 0.1}));
    assert_eq!(rank(&input, "df"), rank(&input, "df"));
}

#[test]
fn primary_flag_follows_predicted_label_not_rank() {
    let entries = rank(
        &scores(json!({"mel": 0.4, "bcc": 0.3, "bkl": 0.2, "nv": 0.1})),
        "nv",
    );
    assert_eq!(entries[3].class_code, ClassCode::Nv);
    assert!(entries[3].is_primary);
    assert_eq!(entries.iter().filter(|e| e.is_primary).count(), 1);
    assert!(!entries[0].is_primary);
}

#[test]
fn unknown_label_marks_no_primary() {
    let entries = rank(&scores(json!({"mel": 0.4})), "xyz");
    assert!(entries.iter().all(|e| !e.is_primary));
}

#[test]
fn percentage_rounds_to_one_decimal() {
    assert_eq!(score_percent(0.6789), 67.9);
    assert_eq!(score_percent(0.0), 0.0);
    assert_eq!(score_percent(1.0), 100.0);

    let entries = rank(&scores(json!({"mel": 0.6789})), "mel");
    assert_eq!(entries[0].score_percent, 67.9);
}

#[test]
fn entries_carry_names_tiers_and_clamped_bars() {
    let entries = rank(&scores(json!({"akiec": 1.4, "df": -0.2})), "akiec");
    let top = &entries[0];
    assert_eq!(top.class_code, ClassCode::Akiec);
    assert_eq!(top.display_name, "Actinic Keratosis");
    assert_eq!(top.risk_tier, RiskTier::High);
    assert_eq!(top.score, 1.4);
    assert_eq!(top.bar_fraction, 1.0);

    let last = entries.last().unwrap();
    assert_eq!(last.class_code, ClassCode::Df);
    assert_eq!(last.bar_fraction, 0.0);
}

#[test]
fn malformed_scores_count_as_zero() {
    let entries = rank(&scores(json!({"mel": "n/a", "bcc": null, "nv": 0.2})), "nv");
    assert_eq!(entries[0].class_code, ClassCode::Nv);
    assert!(entries[1..].iter().all(|e| e.score == 0.0));
}

#[test]
fn scores_not_summing_to_one_are_left_alone() {
    let entries = rank(&scores(json!({"mel": 0.8, "nv": 0.8, "bcc": 0.8})), "mel");
    assert!(entries[..3].iter().all(|e| e.score_percent == 80.0));
}

#[test]
fn percentage_rounds_like_confidence_formatting() {
    assert_eq!(score_percent(0.0025), 0.2);
    assert_eq!(score_percent(0.0015), 0.1);
    assert_eq!(score_percent(0.0125), 1.2);

    let entries = rank(&scores(json!({"bcc": 0.0125})), "bcc");
    assert_eq!(
        format!("{:.1}%", entries[0].score_percent),
        format_confidence(0.0125)
    );
}
