//! Plugin configuration loading: document location, variable mode and inspector defaults.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::style::variables::ModeSelection;

/// Default location on disk where the plugins look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/stylekit.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "STYLEKIT_CONFIG_PATH";
/// Default document snapshot served by the in-memory host.
const DEFAULT_DOCUMENT_PATH: &str = "document.json";
/// Environment variable that overrides the configured document path.
const DOCUMENT_PATH_ENV: &str = "STYLEKIT_DOCUMENT_PATH";
/// Scale used when rendering node previews.
const DEFAULT_PREVIEW_SCALE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared by both plugins.
pub struct AppConfig {
    /// Document snapshot served by the in-memory host.
    pub document_path: PathBuf,
    /// Mode whose value is reported when listing variables.
    pub variable_mode: ModeSelection,
    /// Whether `get-selection` wraps bound attributes in `var()` when the UI does not say.
    pub default_use_variables: bool,
    /// Scale passed to the host when rendering previews.
    pub preview_scale: f32,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_path(CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH);
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        mode = ?config.variable_mode,
                        "loaded plugin config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_document_override()
    }

    fn with_document_override(mut self) -> Self {
        if let Some(path) = env::var_os(DOCUMENT_PATH_ENV).filter(|path| !path.is_empty()) {
            self.document_path = PathBuf::from(path);
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            variable_mode: ModeSelection::First,
            default_use_variables: true,
            preview_scale: DEFAULT_PREVIEW_SCALE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    document_path: Option<PathBuf>,
    variable_mode: Option<ModeSelection>,
    default_use_variables: Option<bool>,
    preview_scale: Option<f32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            document_path: value.document_path.unwrap_or(defaults.document_path),
            variable_mode: value.variable_mode.unwrap_or(defaults.variable_mode),
            default_use_variables: value
                .default_use_variables
                .unwrap_or(defaults.default_use_variables),
            preview_scale: value
                .preview_scale
                .filter(|scale| *scale > 0.0)
                .unwrap_or(defaults.preview_scale),
        }
    }
}

/// Resolve a path taking the environment override into account.
fn resolve_path(env_key: &str, default: &str) -> PathBuf {
    env::var_os(env_key)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(default))
}
