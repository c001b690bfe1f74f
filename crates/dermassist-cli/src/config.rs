use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dermassist_export::{DocumentStyles, ExportFormat};
use dermassist_report::ReportSettings;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "com.dermassist.report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DermAssistConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Branding, model info and disclaimer printed on every report.
    #[serde(default)]
    pub settings: ReportSettings,
    #[serde(default)]
    pub styles: DocumentStyles,
    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

fn default_format() -> ExportFormat {
    ExportFormat::Pdf
}

impl Default for DermAssistConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            settings: ReportSettings::default(),
            styles: DocumentStyles::default(),
            default_format: default_format(),
            created_at: None,
        }
    }
}

/// `<config dir>/com.dermassist.report/config.json`.
pub fn default_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR).join("config.json"))
}

pub fn load_config(path: &Path) -> eyre::Result<DermAssistConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DermAssistConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config at `path`, or the built-in defaults when no file exists.
pub fn load_or_default(path: &Path) -> eyre::Result<DermAssistConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DermAssistConfig::default());
    }
    load_config(path)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update DermAssist."
        ));
    }

    // v0 → v1: report text moved under `settings`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let mut settings = serde_json::Map::new();
        for key in ["branding", "model", "disclaimer"] {
            if let Some(value) = obj.remove(key) {
                settings.insert(key.to_string(), value);
            }
        }
        if !settings.is_empty() {
            obj.entry("settings")
                .or_insert(serde_json::Value::Object(settings));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (moved report text under settings)");
    }

    Ok(json)
}

pub fn save_config(config: &DermAssistConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
