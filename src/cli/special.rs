//! Embedded config dump

use std::io::Write;

use anyhow::Result;

use super::LookupError;
use crate::loader::Archive;
use crate::model::{decode_text, render_value, ModelConfig, SPECIAL_KEY};

/// Print the embedded config text, or the value of one of its fields
///
/// A missing field is an error, not a lookup failure.
pub fn special<W: Write>(archive: &mut Archive, field: Option<&str>, out: &mut W) -> Result<()> {
    if !archive.contains(SPECIAL_KEY) {
        return Err(LookupError::MissingSpecialKey.into());
    }

    let payload = archive.raw_bytes(SPECIAL_KEY)?;

    match field {
        None => {
            let text = decode_text(&payload)?;
            writeln!(out, "{}", text)?;
        }
        Some(field) => {
            let config = ModelConfig::from_payload(&payload)?;
            writeln!(out, "{}", render_value(config.get(field)?))?;
        }
    }

    Ok(())
}
