//! Run configuration
//!
//! The command-line flags overlap (`--special` wins over `--key`, which
//! wins over listing), so they are resolved once into a [`Mode`].

/// What a run reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Dump the embedded config text, or one field of it
    Special { field: Option<String> },
    /// Dump one array
    Key { key: String, full_matrix: bool },
    /// List every key with the total parameter count
    List { matrix_info: bool },
}

/// Resolved configuration for one inspection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    /// Path of the model archive
    pub model: String,
    pub mode: Mode,
}

impl InspectConfig {
    /// Resolve raw flag values into a mode
    ///
    /// Flags that do not apply to the chosen mode are ignored.
    pub fn new(
        model: impl Into<String>,
        key: Option<String>,
        special: bool,
        full_matrix: bool,
        matrix_info: bool,
    ) -> Self {
        let mode = match (special, key) {
            (true, field) => Mode::Special { field },
            (false, Some(key)) => Mode::Key { key, full_matrix },
            (false, None) => Mode::List { matrix_info },
        };
        Self {
            model: model.into(),
            mode,
        }
    }
}
