//! Shared fixtures for CLI tests: model archives written into temp dirs

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(dead_code)]
#[path = "../../src/testing.rs"]
mod fixtures;

pub use fixtures::{f32_entry, i32_entry, special_entry};

pub const SPECIAL_KEY: &str = "special:model.yml";

/// A temp dir holding one `model.npz`
pub struct ModelFixture {
    _tmp: TempDir,
    pub path: PathBuf,
}

impl ModelFixture {
    pub fn new(entries: &[(&str, Vec<u8>)]) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let path = fixtures::write_npz(tmp.path(), entries);
        Self { _tmp: tmp, path }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("model-info").expect("find model-info binary");
        cmd.env_remove("RUST_LOG").arg("-m").arg(&self.path);
        cmd
    }
}
