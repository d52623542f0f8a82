//! Archive loading
//!
//! A model archive is a zip of NPY entries, one per named array. Opening
//! an [`Archive`] only reads the zip directory: key listing and membership
//! never touch entry data. Headers and data are read per entry on request.

mod detect;

pub use detect::{detect_archive_format, ArchiveFormat};

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use npyz::NpyFile;
use zip::ZipArchive;

use crate::array::{read_bytes, ArrayHeader, NpyArray};

/// A named-array archive opened for reading
pub struct Archive {
    path: PathBuf,
    zip: ZipArchive<BufReader<File>>,
    /// Keys in directory order
    keys: Vec<String>,
    /// Key to zip entry index
    entries: HashMap<String, usize>,
}

impl Archive {
    /// Open an archive, reading only its directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        match detect_archive_format(path)? {
            ArchiveFormat::Npz => {}
            ArchiveFormat::Npy => {
                return Err(anyhow!(
                    "{} is a single NPY array, not a named-array archive",
                    path.display()
                ))
            }
        }

        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let zip = ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("Failed to open archive {}", path.display()))?;

        let mut keys = Vec::with_capacity(zip.len());
        let mut entries = HashMap::with_capacity(zip.len());
        for index in 0..zip.len() {
            let Some(name) = zip.name_for_index(index) else {
                continue;
            };
            let key = key_from_entry_name(name);
            if entries.contains_key(key) {
                tracing::warn!("Duplicate entry '{}' in archive, keeping the first", name);
                continue;
            }
            entries.insert(key.to_string(), index);
            keys.push(key.to_string());
        }

        tracing::debug!(
            "Opened archive {} with {} entries",
            path.display(),
            keys.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            zip,
            keys,
            entries,
        })
    }

    /// Path the archive was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys in archive order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Whether `key` names an entry, either as a key or as its `.npy` member name
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Read the header of an entry without reading its data
    pub fn header(&mut self, key: &str) -> Result<ArrayHeader> {
        let npy = self.open_entry(key)?;
        let header = ArrayHeader::from_npy(npy.header())
            .with_context(|| format!("Invalid header in entry '{}'", key))?;
        tracing::trace!("Read header of '{}': {:?}", key, header);
        Ok(header)
    }

    /// Materialize an entry
    pub fn array(&mut self, key: &str) -> Result<NpyArray> {
        let npy = self.open_entry(key)?;
        let array =
            NpyArray::read(npy).with_context(|| format!("Failed to read entry '{}'", key))?;
        tracing::debug!(
            "Materialized '{}': shape {} dtype {}",
            key,
            array.shape(),
            array.header().dtype_name()
        );
        Ok(array)
    }

    /// Data of a one-byte integer entry as raw bytes
    pub fn raw_bytes(&mut self, key: &str) -> Result<Vec<u8>> {
        let npy = self.open_entry(key)?;
        read_bytes(npy).with_context(|| format!("Failed to read entry '{}'", key))
    }

    /// Position the entry's reader at its data, its NPY header parsed
    fn open_entry(&mut self, key: &str) -> Result<NpyFile<zip::read::ZipFile<'_>>> {
        let index = self
            .lookup(key)
            .ok_or_else(|| anyhow!("No entry '{}' in {}", key, self.path.display()))?;
        let entry = self.zip.by_index(index)?;
        NpyFile::new(entry).with_context(|| format!("Failed to read header of entry '{}'", key))
    }

    fn lookup(&self, key: &str) -> Option<usize> {
        self.entries.get(key).copied().or_else(|| {
            key.strip_suffix(".npy")
                .and_then(|stem| self.entries.get(stem).copied())
        })
    }
}

/// Array key for a zip entry name
///
/// A `.npy` suffix is dropped and an interior NUL ends the name. Other
/// entries keep their full name.
pub fn key_from_entry_name(name: &str) -> &str {
    npyz::npz::array_name_from_file_name(name).unwrap_or(name)
}
