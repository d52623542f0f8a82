//! CLI surface and report dispatch

mod list;
mod show;
mod special;

pub use list::list;
pub use show::show;
pub use special::special;

use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use clap::Parser;
use thiserror::Error;

use crate::config::{InspectConfig, Mode};
use crate::loader::Archive;

/// Prints keys and values from model.npz file.
#[derive(Parser, Debug)]
#[command(name = "model-info")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Model file
    #[arg(long, short)]
    pub model: String,

    /// Print value for specific key
    #[arg(long, short)]
    pub key: Option<String>,

    /// Print values from special:model.yml node
    #[arg(long, short)]
    pub special: bool,

    /// Print every element of the array for a single key, one per line
    #[arg(long, short)]
    pub full_matrix: bool,

    /// Print shape and dtype for all keys (short form: -mi)
    #[arg(long)]
    pub matrix_info: bool,
}

impl From<Cli> for InspectConfig {
    fn from(cli: Cli) -> Self {
        InspectConfig::new(
            cli.model,
            cli.key,
            cli.special,
            cli.full_matrix,
            cli.matrix_info,
        )
    }
}

/// Lookup failures reported to the user with exit status 1
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("No special Marian YAML node found in the model")]
    MissingSpecialKey,

    #[error("Key not found")]
    KeyNotFound,
}

/// Rewrite the two-letter `-mi` short flag to `--matrix-info`
///
/// clap only knows single-character short flags and would read `-mi` as
/// `-m i`. An `-mi` in value position (after `-m`/`-k`) is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_value = false;

    for arg in args {
        let arg = arg.into();
        if !expects_value && arg.to_str() == Some("-mi") {
            normalized.push(OsString::from("--matrix-info"));
            continue;
        }
        expects_value = matches!(arg.to_str(), Some("-m" | "--model" | "-k" | "--key"));
        normalized.push(arg);
    }

    normalized
}

/// Open the model and write the report selected by `config` to `out`
pub fn inspect<W: Write>(config: &InspectConfig, out: &mut W) -> Result<()> {
    let mut archive = Archive::open(&config.model)?;

    match &config.mode {
        Mode::Special { field } => special(&mut archive, field.as_deref(), out),
        Mode::Key { key, full_matrix } => show(&mut archive, key, *full_matrix, out),
        Mode::List { matrix_info } => list(&mut archive, *matrix_info, out),
    }
}
