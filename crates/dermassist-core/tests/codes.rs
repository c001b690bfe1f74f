use dermassist_core::codes::{classify, description, display_name};
use dermassist_core::{ClassCode, RiskTier};

#[test]
fn high_risk_codes() {
    for code in ["mel", "bcc", "akiec"] {
        assert_eq!(classify(code), RiskTier::High, "{code}");
    }
}

#[test]
fn moderate_and_low_risk_codes() {
    for code in ["bkl", "df", "vasc"] {
        assert_eq!(classify(code), RiskTier::Moderate, "{code}");
    }
    assert_eq!(classify("nv"), RiskTier::Low);
}

#[test]
fn unknown_code_is_tolerated() {
    assert_eq!(classify("xyz"), RiskTier::Unknown);
    assert_eq!(display_name("xyz"), "xyz");
    assert_eq!(description("xyz"), "");
    assert_eq!(RiskTier::Unknown.recommendation(), "");
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(ClassCode::from_code("MEL"), None);
    assert_eq!(classify("MEL"), RiskTier::Unknown);
}

#[test]
fn canonical_order_matches_table() {
    let symbols: Vec<_> = ClassCode::ALL.iter().map(|c| c.code()).collect();
    assert_eq!(symbols, ["mel", "bcc", "akiec", "bkl", "df", "vasc", "nv"]);
    for (i, code) in ClassCode::ALL.iter().enumerate() {
        assert_eq!(code.canonical_rank(), i);
        assert_eq!(ClassCode::from_code(code.code()), Some(*code));
    }
}

#[test]
fn every_known_code_has_name_and_description() {
    for code in ClassCode::ALL {
        assert_ne!(display_name(code.code()), code.code());
        assert!(!description(code.code()).is_empty());
    }
    assert_eq!(display_name("nv"), "Melanocytic Nevi");
}

#[test]
fn tier_labels() {
    assert_eq!(RiskTier::High.label(), "High Risk");
    assert_eq!(RiskTier::Moderate.short_label(), "Moderate");
    assert_eq!(RiskTier::Low.to_string(), "Low Risk");
    assert!(RiskTier::High.recommendation().contains("3–5 business days"));
    assert!(RiskTier::Moderate.recommendation().contains("2–4 weeks"));
    assert!(RiskTier::Low.recommendation().contains("self-examinations"));
}

#[test]
fn clinical_text_is_verbatim() {
    assert_eq!(
        description("nv"),
        "Melanocytic Nevi (common moles) are benign pigmented growths. Most are harmless \
         — however, changes in size, shape or color should be evaluated promptly."
    );
    assert_eq!(
        RiskTier::High.recommendation(),
        "Seek immediate dermatological consultation within 3–5 business days. Do NOT delay \
         — early detection significantly improves outcomes for high-risk lesions."
    );
}
