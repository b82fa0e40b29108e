use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::TasyConfig;
use crate::document::ConfigDocument;
use crate::error::ConfigError;

/// File looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "config_exames.json";
const CONFIG_ENV_VAR: &str = "TASY_CONFIG";

/// Resolves the configuration path: explicit path, then `TASY_CONFIG`, then
/// [`DEFAULT_CONFIG_FILE`].
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

pub fn load_config(path: &Path) -> Result<TasyConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    let config = parse_config(&text, path)?;
    info!(
        path = %path.display(),
        exam_count = config.exams().len(),
        facility_count = config.facilities().len(),
        version = config.version().unwrap_or("N/A"),
        "configuration loaded"
    );
    Ok(config)
}

/// Parses configuration text; `origin` is only used in error messages.
pub fn parse_config(text: &str, origin: &Path) -> Result<TasyConfig, ConfigError> {
    let document: ConfigDocument =
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
    debug!(
        exam_entries = document.exams.len(),
        facility_entries = document.estabelecimentos.len(),
        "configuration document parsed"
    );
    TasyConfig::from_document(document)
}
