//! Key listing command

use std::io::Write;

use anyhow::{anyhow, Result};

use crate::loader::Archive;
use crate::model::SPECIAL_KEY;

/// List every key, optionally with shape and dtype, then the parameter total
///
/// Only entry headers are read. The embedded config is listed but never
/// counted as parameters.
pub fn list<W: Write>(archive: &mut Archive, matrix_info: bool, out: &mut W) -> Result<()> {
    let keys = archive.keys().to_vec();
    let mut total_params: u64 = 0;

    for key in &keys {
        let is_special = key == SPECIAL_KEY;

        // The config entry's header is only read when shapes are shown
        let header = if matrix_info || !is_special {
            Some(archive.header(key)?)
        } else {
            None
        };

        match &header {
            Some(header) if matrix_info => {
                writeln!(out, "{} {} {}", key, header.shape(), header.dtype_name())?
            }
            _ => writeln!(out, "{}", key)?,
        }

        if let (Some(header), false) = (&header, is_special) {
            total_params = total_params
                .checked_add(header.element_count() as u64)
                .ok_or_else(|| anyhow!("parameter total overflows at '{}'", key))?;
        }
    }

    writeln!(out, "Total number of parameters: {}", total_params)?;
    Ok(())
}
