//! model-info - inspect Marian model archives
//!
//! A Marian `model.npz` is a zip of NPY arrays, one per parameter, plus a
//! `special:model.yml` entry holding the model's YAML configuration as raw
//! bytes. This crate lists the arrays, dumps their values, and decodes the
//! embedded configuration.
//!
//! # Example
//!
//! ```bash
//! # List keys and the total parameter count
//! model-info -m model.npz
//!
//! # Include shapes and dtypes
//! model-info -m model.npz -mi
//!
//! # Dump one array, every element on its own line
//! model-info -m model.npz -k decoder_ff_logit_out_b -f
//!
//! # Print one field of the embedded config
//! model-info -m model.npz -s -k dim-emb
//! ```

pub mod array;
pub mod cli;
pub mod config;
pub mod loader;
pub mod model;

#[cfg(test)]
mod testing;

// Re-export key types
pub use array::{ArrayHeader, NpyArray, NpyError, Scalar, Shape};
pub use config::{InspectConfig, Mode};
pub use loader::{Archive, ArchiveFormat};
pub use model::{ConfigError, ModelConfig, SPECIAL_KEY};
