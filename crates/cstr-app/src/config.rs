//! Reactor configuration files (YAML or JSON, picked by extension).

use std::path::Path;

use cstr_sim::ReactorState;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse and validate a reactor configuration.
pub fn parse_config(text: &str, format: ConfigFormat) -> AppResult<ReactorState> {
    let state: ReactorState = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    state.validate()?;
    Ok(state)
}

pub fn render_config(state: &ReactorState, format: ConfigFormat) -> AppResult<String> {
    let text = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(state)?,
        ConfigFormat::Json => serde_json::to_string_pretty(state)?,
    };
    Ok(text)
}

/// Load a reactor configuration from disk.
pub fn load_config(path: &Path) -> AppResult<ReactorState> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content, format)
}

/// Save a reactor configuration to disk.
pub fn save_config(path: &Path, state: &ReactorState) -> AppResult<()> {
    let format = ConfigFormat::from_path(path)?;
    state.validate()?;
    let content = render_config(state, format)?;
    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
