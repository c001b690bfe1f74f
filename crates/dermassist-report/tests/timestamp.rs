use dermassist_report::timestamp::{NOT_AVAILABLE, ScanMoment, parse_timestamp};

#[test]
fn parses_utc_timestamp() {
    let moment = ScanMoment::from_raw(Some("2025-03-05T14:30:00Z"));
    assert_eq!(moment.date, "05 March 2025");
    assert_eq!(moment.time.as_deref(), Some("02:30 PM"));
}

#[test]
fn parses_fractional_seconds_without_zone() {
    let moment = ScanMoment::from_raw(Some("2024-11-20T08:05:59.123456"));
    assert_eq!(moment.date, "20 November 2024");
    assert_eq!(moment.time.as_deref(), Some("08:05 AM"));
}

#[test]
fn date_only_is_midnight() {
    let moment = ScanMoment::from_raw(Some("2025-01-02"));
    assert_eq!(moment.date, "02 January 2025");
    assert_eq!(moment.time.as_deref(), Some("12:00 AM"));
}

#[test]
fn offset_timestamp_keeps_a_time() {
    let moment = ScanMoment::from_raw(Some("2025-03-05T14:30:00+02:00"));
    assert_eq!(moment.date, "05 March 2025");
    assert!(moment.is_time_available());
}

#[test]
fn unparsable_text_falls_back_to_first_ten_chars() {
    let moment = ScanMoment::from_raw(Some("not-a-date"));
    assert_eq!(moment.date, "not-a-date");
    assert_eq!(moment.time, None);
    assert_eq!(moment.time_label(), NOT_AVAILABLE);

    let moment = ScanMoment::from_raw(Some("2025/03/05 at noon"));
    assert_eq!(moment.date, "2025/03/05");
    assert!(!moment.is_time_available());
}

#[test]
fn fallback_counts_characters_not_bytes() {
    let moment = ScanMoment::from_raw(Some("ñññññññññññ"));
    assert_eq!(moment.date.chars().count(), 10);
}

#[test]
fn missing_timestamp_is_not_available() {
    for raw in [None, Some("")] {
        let moment = ScanMoment::from_raw(raw);
        assert_eq!(moment.date, NOT_AVAILABLE);
        assert_eq!(moment.time, None);
    }
}

#[test]
fn parse_rejects_garbage() {
    assert!(parse_timestamp("yesterday").is_none());
    assert!(parse_timestamp("   ").is_none());
    assert!(parse_timestamp("2025-13-40").is_none());
}
