//! Single-key value dump

use std::io::Write;

use anyhow::Result;

use super::LookupError;
use crate::loader::Archive;

/// Print one array, summarized or element by element
pub fn show<W: Write>(
    archive: &mut Archive,
    key: &str,
    full_matrix: bool,
    out: &mut W,
) -> Result<()> {
    if !archive.contains(key) {
        tracing::debug!("'{}' not in {}", key, archive.path().display());
        return Err(LookupError::KeyNotFound.into());
    }

    let array = archive.array(key)?;

    if full_matrix {
        for scalar in array.scalars() {
            writeln!(out, "{}", scalar)?;
        }
    } else {
        writeln!(out, "{}", array)?;
    }

    Ok(())
}
