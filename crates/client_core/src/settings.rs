//! Client configuration: where the grading service lives.
//!
//! Sources, lowest priority first: `grader.toml` (or the file named by
//! `--config` / `GRADER_CONFIG`), `GRADER_ENDPOINT`, `APP__GRADING_ENDPOINT`,
//! then explicit overrides from the command line or UI.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::protocol::GRADE_PATH;
use tracing::debug;
use url::Url;

use crate::error::SettingsError;

pub const CONFIG_FILE_NAME: &str = "grader.toml";
pub const CONFIG_PATH_ENV: &str = "GRADER_CONFIG";
const ENDPOINT_ENV_VARS: [&str; 2] = ["GRADER_ENDPOINT", "APP__GRADING_ENDPOINT"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub grading_endpoint: Url,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub grading_endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    grading_endpoint: Option<String>,
}

pub fn load_settings(overrides: &SettingsOverrides) -> Result<ClientSettings, SettingsError> {
    load_settings_with_env(overrides, |name| std::env::var(name).ok())
}

fn load_settings_with_env(
    overrides: &SettingsOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let non_empty_env = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let explicit_path = overrides
        .config_path
        .clone()
        .or_else(|| non_empty_env(CONFIG_PATH_ENV).map(PathBuf::from));
    let file_settings = match explicit_path {
        Some(path) => read_settings_file(&path)?,
        None => read_optional_settings_file(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default(),
    };

    let mut endpoint = file_settings.grading_endpoint;
    for name in ENDPOINT_ENV_VARS {
        if let Some(value) = non_empty_env(name) {
            endpoint = Some(value);
        }
    }
    if let Some(value) = &overrides.grading_endpoint {
        endpoint = Some(value.clone());
    }

    let raw = endpoint.ok_or(SettingsError::MissingEndpoint)?;
    let grading_endpoint = parse_grading_endpoint(&raw)?;
    debug!(%grading_endpoint, "resolved grading endpoint");
    Ok(ClientSettings { grading_endpoint })
}

/// Parses an http(s) URL; a bare base such as `http://host:5000` gets the
/// default `/grade` path.
pub fn parse_grading_endpoint(raw: &str) -> Result<Url, SettingsError> {
    let raw = raw.trim();
    let invalid = |reason: String| SettingsError::InvalidEndpoint {
        value: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.path().is_empty() || url.path() == "/" {
        url.set_path(GRADE_PATH);
    }
    Ok(url)
}

fn read_settings_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings_file(path, &raw)
}

fn read_optional_settings_file(path: &Path) -> Result<Option<FileSettings>, SettingsError> {
    match fs::read_to_string(path) {
        Ok(raw) => parse_settings_file(path, &raw).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_settings_file(path: &Path, raw: &str) -> Result<FileSettings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
