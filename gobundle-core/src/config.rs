//! Fixed generation parameters.
//!
//! Everything here is read-only for the lifetime of a run and is passed
//! by reference into each step rather than kept in globals.

use std::path::PathBuf;

/// Go release whose toolchain is invoked and whose binaries are built.
pub const DEFAULT_GO_VERSION: &str = "1.14beta1";

pub const DEFAULT_GOOS: &str = "js";
pub const DEFAULT_GOARCH: &str = "wasm";

pub const DEFAULT_STDFILES_PATH: &str = "stdfiles.js";
pub const DEFAULT_BIN_DIR: &str = "bin";
pub const DEFAULT_EXPORT_NAME: &str = "stdfiles";

/// A single `go build` invocation: `package` is built into `bin_dir/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub name: String,
    pub package: String,
}

impl BuildJob {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    /// The `go`, `compile` and `link` commands, versioned by `go_version`.
    pub fn defaults(go_version: &str) -> Vec<BuildJob> {
        ["go", "compile", "link"]
            .into_iter()
            .map(|cmd| BuildJob::new(format!("{cmd}{go_version}.wasm"), format!("cmd/{cmd}")))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub go_version: String,
    /// Program to run; `go<version>` unless overridden.
    pub toolchain: String,
    pub goos: String,
    pub goarch: String,
    pub stdfiles_path: PathBuf,
    pub export_name: String,
    pub bin_dir: PathBuf,
    pub jobs: Vec<BuildJob>,
}

impl GenConfig {
    pub fn new(go_version: impl Into<String>) -> Self {
        let go_version = go_version.into();
        Self {
            toolchain: format!("go{go_version}"),
            goos: DEFAULT_GOOS.to_string(),
            goarch: DEFAULT_GOARCH.to_string(),
            stdfiles_path: PathBuf::from(DEFAULT_STDFILES_PATH),
            export_name: DEFAULT_EXPORT_NAME.to_string(),
            bin_dir: PathBuf::from(DEFAULT_BIN_DIR),
            jobs: BuildJob::defaults(&go_version),
            go_version,
        }
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig::new(DEFAULT_GO_VERSION)
    }
}
