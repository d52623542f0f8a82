//! Model-level knowledge about Marian archives

mod config;

pub use config::{decode_ascii, decode_text, render_value, ConfigError, ModelConfig};

/// Archive key holding the embedded YAML configuration instead of a tensor
pub const SPECIAL_KEY: &str = "special:model.yml";
