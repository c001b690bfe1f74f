use dermassist_core::{ClassCode, ClassificationResult, CoreError, PatientProfile, ScoreMap};
use serde_json::json;

#[test]
fn scan_record_decodes_store_fields() {
    let scan = ClassificationResult::from_value(&json!({
        "id": 42,
        "predicted_label": "bcc",
        "confidence_score": "0.81",
        "raw_output": "{\"bcc\": 0.81, \"nv\": 0.1}",
        "created_at": "2025-03-05T14:30:00Z",
    }))
    .unwrap();

    assert_eq!(scan.id, 42);
    assert_eq!(scan.predicted_label, "bcc");
    assert!((scan.confidence_score - 0.81).abs() < 1e-12);
    assert_eq!(scan.created_at.as_deref(), Some("2025-03-05T14:30:00Z"));

    let scores = scan.score_map().unwrap();
    assert!((scores.get(ClassCode::Bcc) - 0.81).abs() < 1e-12);
    assert_eq!(scores.get(ClassCode::Mel), 0.0);
}

#[test]
fn scan_record_defaults_missing_fields() {
    let scan = ClassificationResult::from_value(&json!({})).unwrap();
    assert_eq!(scan.id, 0);
    assert_eq!(scan.predicted_label, "nv");
    assert_eq!(scan.confidence_score, 0.0);
    assert_eq!(scan.created_at, None);
    assert_eq!(scan.score_map().unwrap(), ScoreMap::default());
}

#[test]
fn scan_record_tolerates_wrong_scalar_types() {
    let scan = ClassificationResult::from_value(&json!({
        "id": "17",
        "confidence_score": "high",
        "created_at": 20250305,
        "raw_scores": {"mel": "oops", "df": 0.2},
    }))
    .unwrap();

    assert_eq!(scan.id, 17);
    assert_eq!(scan.confidence_score, 0.0);
    assert_eq!(scan.created_at.as_deref(), Some("20250305"));
    let scores = scan.score_map().unwrap();
    assert_eq!(scores.get(ClassCode::Mel), 0.0);
    assert_eq!(scores.get(ClassCode::Df), 0.2);
}

#[test]
fn missing_records_are_invalid_input() {
    assert!(matches!(
        ClassificationResult::from_value(&json!(null)),
        Err(CoreError::InvalidInput { .. })
    ));
    assert!(matches!(
        PatientProfile::from_value(&json!([1, 2])),
        Err(CoreError::InvalidInput { .. })
    ));
}

#[test]
fn non_mapping_scores_are_invalid_input() {
    for raw in [json!(0.5), json!(true), json!([0.1, 0.9]), json!("not json"), json!("[1]")] {
        let err = ScoreMap::from_value(&raw).unwrap_err();
        match err {
            CoreError::InvalidInput { field, .. } => assert_eq!(field, "raw_scores"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn unknown_score_keys_are_set_aside() {
    let scores = ScoreMap::from_value(&json!({"mel": 0.4, "scc": 0.3})).unwrap();
    assert_eq!(scores.get(ClassCode::Mel), 0.4);
    assert_eq!(scores.ignored_keys(), ["scc".to_string()]);
}

#[test]
fn scores_are_not_renormalized() {
    let scores = ScoreMap::from_value(&json!({"mel": 0.9, "nv": 0.9})).unwrap();
    assert_eq!(scores.get(ClassCode::Mel), 0.9);
    assert_eq!(scores.get(ClassCode::Nv), 0.9);
    assert!((scores.total() - 1.8).abs() < 1e-12);
}

#[test]
fn patient_empty_strings_count_as_absent() {
    let patient = PatientProfile::from_value(&json!({
        "full_name": "Ada Obi",
        "email": "",
        "phone_number": 5551234,
    }))
    .unwrap();

    assert_eq!(patient.full_name.as_deref(), Some("Ada Obi"));
    assert_eq!(patient.email, None);
    assert_eq!(patient.phone_number.as_deref(), Some("5551234"));
    assert_eq!(patient.gender, None);
}
