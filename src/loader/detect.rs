//! Archive format detection

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Leading bytes of a bare NPY file
const NPY_MAGIC: &[u8] = b"\x93NUMPY";

/// Detected archive format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Zip of NPY entries (`numpy.savez`, Marian `model.npz`)
    Npz,
    /// A single bare NPY array
    Npy,
}

/// Detect the archive format from the file's leading bytes
pub fn detect_archive_format<P: AsRef<Path>>(path: P) -> Result<ArchiveFormat> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(anyhow!("Model not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("Model path is not a file: {}", path.display()));
    }

    let mut magic = Vec::with_capacity(NPY_MAGIC.len());
    File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .take(NPY_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    // An empty zip is only an end-of-central-directory record
    if magic.starts_with(b"PK\x03\x04") || magic.starts_with(b"PK\x05\x06") {
        Ok(ArchiveFormat::Npz)
    } else if magic == NPY_MAGIC {
        Ok(ArchiveFormat::Npy)
    } else {
        Err(anyhow!("Unsupported model file format: {}", path.display()))
    }
}
