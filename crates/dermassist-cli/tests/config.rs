use dermassist_cli::config::{
    CURRENT_VERSION, DermAssistConfig, load_config, load_or_default, migrate, save_config,
};
use dermassist_export::ExportFormat;
use serde_json::json;

#[test]
fn migrate_v0_moves_report_text_under_settings() {
    let v0 = json!({
        "branding": { "name": "SkinCheck" },
        "disclaimer": "Not a diagnosis.",
        "default_format": "docx"
    });
    let migrated = migrate(v0, 0).unwrap();

    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["settings"]["branding"]["name"], "SkinCheck");
    assert_eq!(migrated["settings"]["disclaimer"], "Not a diagnosis.");
    assert!(migrated.get("branding").is_none());

    let config: DermAssistConfig = serde_json::from_value(migrated).unwrap();
    assert_eq!(config.settings.branding.name, "SkinCheck");
    // Fields absent from the old file keep their defaults.
    assert_eq!(config.settings.model.name, "DermAssist v2.0");
    assert_eq!(config.default_format, ExportFormat::Docx);
}

#[test]
fn migrate_rejects_newer_versions() {
    let err = migrate(json!({}), CURRENT_VERSION + 1).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn migrate_rejects_non_objects() {
    assert!(migrate(json!([1, 2]), 0).is_err());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = DermAssistConfig::default();
    config.config_version = 0;
    config.default_format = ExportFormat::Markdown;
    config.settings.branding.name = "Clinic".to_string();
    save_config(&config, &path).unwrap();

    assert!(!path.with_extension("json.tmp").exists());
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.default_format, ExportFormat::Markdown);
    assert_eq!(loaded.settings.branding.name, "Clinic");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, DermAssistConfig::default());
}

#[test]
fn unversioned_file_on_disk_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "disclaimer": "Old text" }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.settings.disclaimer, "Old text");
    assert_eq!(config.default_format, ExportFormat::Pdf);
}
