//! Embedded model configuration
//!
//! Marian stores its training/decoding options as YAML text inside the
//! archive, in a 1-D byte array under [`SPECIAL_KEY`](super::SPECIAL_KEY).
//! The writer appends one trailing byte after the text (usually a NUL),
//! which strict decoding rejects, so [`ModelConfig::from_payload`] retries
//! once without it.

use serde_yaml::Value;
use thiserror::Error;

/// Errors decoding the embedded configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("byte 0x{byte:02x} at offset {offset} is not ASCII")]
    NonAscii { offset: usize, byte: u8 },

    #[error("character {character:?} at offset {offset} is not allowed in a YAML stream")]
    NonPrintable { offset: usize, character: char },

    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config document is not a mapping")]
    NotAMapping,

    #[error("no field '{0}' in config document")]
    MissingField(String),
}

impl ConfigError {
    /// Errors raised while turning bytes into a character stream, before
    /// any YAML structure is looked at
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ConfigError::NonAscii { .. } | ConfigError::NonPrintable { .. }
        )
    }
}

/// Decode the payload as strict ASCII
pub fn decode_ascii(bytes: &[u8]) -> Result<String, ConfigError> {
    match bytes.iter().position(|b| !b.is_ascii()) {
        Some(offset) => Err(ConfigError::NonAscii {
            offset,
            byte: bytes[offset],
        }),
        None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Decode the payload as ASCII, dropping a single trailing non-ASCII byte
pub fn decode_text(bytes: &[u8]) -> Result<String, ConfigError> {
    match decode_ascii(bytes) {
        Err(ConfigError::NonAscii { offset, .. }) if offset + 1 == bytes.len() => {
            tracing::debug!("Dropping trailing non-ASCII byte from config text");
            decode_ascii(&bytes[..offset])
        }
        result => result,
    }
}

/// Reject characters a YAML reader does not accept in a stream
fn check_printable(text: &str) -> Result<(), ConfigError> {
    let bad = text.char_indices().find(|&(_, c)| {
        !matches!(c,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{7e}'
            | '\u{85}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}')
            || c == '\u{feff}'
    });
    match bad {
        Some((offset, character)) => Err(ConfigError::NonPrintable { offset, character }),
        None => Ok(()),
    }
}

/// The parsed configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    root: Value,
}

impl ModelConfig {
    /// Strictly decode and parse a payload
    pub fn parse(bytes: &[u8]) -> Result<Self, ConfigError> {
        let text = decode_ascii(bytes)?;
        check_printable(&text)?;
        let root = serde_yaml::from_str(&text)?;
        Ok(Self { root })
    }

    /// Parse a payload written by Marian, tolerating its trailing byte
    ///
    /// Only a decode error triggers the retry; YAML syntax errors and a
    /// failing retry are returned as they are.
    pub fn from_payload(bytes: &[u8]) -> Result<Self, ConfigError> {
        match Self::parse(bytes) {
            Err(err) if err.is_decode_error() && !bytes.is_empty() => {
                tracing::debug!("Strict config decode failed ({}), retrying without last byte", err);
                Self::parse(&bytes[..bytes.len() - 1])
            }
            result => result,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Value of a top-level field
    pub fn get(&self, field: &str) -> Result<&Value, ConfigError> {
        let mapping = self.root.as_mapping().ok_or(ConfigError::NotAMapping)?;
        mapping
            .get(field)
            .ok_or_else(|| ConfigError::MissingField(field.to_string()))
    }
}

/// Render a config value on one line
///
/// Strings print bare; sequences and mappings use YAML flow style.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(mapping) => {
            let entries: Vec<String> = mapping
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, render_value(&tagged.value)),
    }
}
