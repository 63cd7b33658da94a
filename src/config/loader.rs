//! Settings record loading and saving (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SettingsRecord;

/// Load a settings record from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use macro_rail::config::load_record;
///
/// let record = load_record("rail.toml")?;
/// ```
pub fn load_record<P: AsRef<Path>>(path: P) -> Result<SettingsRecord> {
    let content = fs::read_to_string(path.as_ref()).map_err(io_error)?;

    parse_record(&content)
}

/// Write a settings record to a TOML file, replacing any previous record.
///
/// # Errors
///
/// Returns an error if the record cannot be serialized or written.
pub fn save_record<P: AsRef<Path>>(path: P, record: &SettingsRecord) -> Result<()> {
    let content = render_record(record)?;
    fs::write(path.as_ref(), content).map_err(io_error)
}

/// Parse a settings record from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_record(content: &str) -> Result<SettingsRecord> {
    let record: SettingsRecord = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_record(&record)?;

    Ok(record)
}

/// Serialize a settings record to TOML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_record(record: &SettingsRecord) -> Result<String> {
    toml::to_string(record).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::SerializeError(msg))
    })
}

fn io_error(e: std::io::Error) -> Error {
    Error::Config(ConfigError::IoError(truncated(&e.to_string())))
}

fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
