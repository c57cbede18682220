//! User settings stored as TOML.
//!
//! The default location is the platform config folder:
//! - macOS: ~/Library/Application Support/com.cleanse.Cleanse/
//! - Windows: %APPDATA%/cleanse/Cleanse/config/
//! - Linux: ~/.config/cleanse/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cleanse_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ServiceConfig};
use cleanse_ingest::{IntakePolicy, MAX_FILE_SIZE};
use cleanse_report::{PREVIEW_ROW_LIMIT, ResultsRenderer};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "cleanse";
const APP_NAME: &str = "Cleanse";
const CONFIG_FILENAME: &str = "settings.toml";

/// A zero timeout would fail every request immediately.
const MIN_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service: ServiceSettings,
    pub intake: IntakeSettings,
    pub preview: PreviewSettings,
    pub export: ExportSettings,
}

/// Where the processing service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub base_url: String,
    pub process_path: String,
    pub health_path: String,
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        let defaults = ServiceConfig::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            process_path: defaults.process_path,
            health_path: defaults.health_path,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ServiceSettings {
    pub fn to_config(&self, log_bodies: bool) -> ServiceConfig {
        ServiceConfig {
            base_url: self.base_url.clone(),
            process_path: self.process_path.clone(),
            health_path: self.health_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS)),
            log_bodies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl IntakeSettings {
    pub fn policy(&self) -> IntakePolicy {
        IntakePolicy::with_max_file_size(self.max_file_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Data rows shown before the "more rows" summary.
    pub max_rows: usize,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_rows: PREVIEW_ROW_LIMIT,
        }
    }
}

impl PreviewSettings {
    pub fn renderer(&self) -> ResultsRenderer {
        ResultsRenderer::with_row_limit(self.max_rows)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: Option<PathBuf>,
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit` or the default location.
///
/// A missing file yields defaults. A broken explicit file is an error; a
/// broken default file is logged and replaced by defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return Ok(read_settings(path)?.unwrap_or_default());
    }
    let Some(path) = settings_path() else {
        warn!("could not determine settings path, using defaults");
        return Ok(Settings::default());
    };
    match read_settings(&path) {
        Ok(Some(settings)) => Ok(settings),
        Ok(None) => {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        Err(error) => {
            warn!(path = %path.display(), error = %format!("{error:#}"), "ignoring settings file");
            Ok(Settings::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<Option<Settings>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(error).with_context(|| format!("read settings {}", path.display()));
        }
    };
    let settings = toml::from_str(&content)
        .with_context(|| format!("parse settings {}", path.display()))?;
    info!(path = %path.display(), "loaded settings");
    Ok(Some(settings))
}
