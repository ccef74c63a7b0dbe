use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CHUNK_SIZE: usize = 120;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_000_000;
pub const DEFAULT_ALT_FORMAT: &str = "$name";

const APP_DIR: &str = "img_b64_tag";
const SETTINGS_FILE: &str = "config.json";

/// Tunables shared read-only by every file in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Encoded characters per line; 0 writes the payload unbroken.
    pub chunk_size: usize,
    pub max_file_size: u64,
    pub alt_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            alt_format: DEFAULT_ALT_FORMAT.to_string(),
        }
    }
}

/// Why a single settings value was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    #[error("{value} is below the minimum of {min}")]
    BelowMinimum { value: i64, min: i64 },
    #[error("expected a string, found `{0}`")]
    NotAString(String),
}

pub fn chunk_size_from(value: &Value) -> Result<usize, SettingsError> {
    let n = bounded_int(value, 0)?;
    usize::try_from(n).map_err(|_| SettingsError::NotAnInteger(value.to_string()))
}

pub fn max_file_size_from(value: &Value) -> Result<u64, SettingsError> {
    let n = bounded_int(value, 1)?;
    u64::try_from(n).map_err(|_| SettingsError::NotAnInteger(value.to_string()))
}

pub fn alt_format_from(value: &Value) -> Result<String, SettingsError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SettingsError::NotAString(value.to_string()))
}

fn bounded_int(value: &Value, min: i64) -> Result<i64, SettingsError> {
    let n = parse_int(value)?;
    if n < min {
        return Err(SettingsError::BelowMinimum { value: n, min });
    }
    Ok(n)
}

fn parse_int(value: &Value) -> Result<i64, SettingsError> {
    let invalid = || SettingsError::NotAnInteger(value.to_string());
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Value::Bool(b) => Ok(i64::from(*b)),
        _ => Err(invalid()),
    }
}

impl Settings {
    /// Builds settings from a parsed document. Each field falls back to its
    /// default on its own; a document that is not an object yields defaults.
    pub fn from_value(doc: &Value) -> Self {
        let mut settings = Self::default();
        let Some(map) = doc.as_object() else {
            log::debug!("settings document is not an object, using defaults");
            return settings;
        };

        if let Some(value) = map.get("chunk_size") {
            match chunk_size_from(value) {
                Ok(n) => settings.chunk_size = n,
                Err(err) => log::debug!("chunk_size rejected: {err}"),
            }
        }
        if let Some(value) = map.get("max_file_size") {
            match max_file_size_from(value) {
                Ok(n) => settings.max_file_size = n,
                Err(err) => log::debug!("max_file_size rejected: {err}"),
            }
        }
        if let Some(value) = map.get("alt_format") {
            match alt_format_from(value) {
                Ok(s) => settings.alt_format = s,
                Err(err) => log::debug!("alt_format rejected: {err}"),
            }
        }
        settings
    }

    /// Loads settings from `path`. A file that cannot be opened gives the
    /// defaults; a file that opens but is not valid JSON is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                log::debug!("no settings at {:?} ({err}), using defaults", path);
                return Ok(Self::default());
            }
        };
        let doc: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;
        Ok(Self::from_value(&doc))
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(SETTINGS_FILE)
    }

    /// Writes the defaults as indented JSON, creating parent directories.
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        Self::default()
            .serialize(&mut ser)
            .context("Failed to serialize default settings")?;
        out.push(b'\n');

        let mut file =
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        file.write_all(&out)
            .with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }
}
