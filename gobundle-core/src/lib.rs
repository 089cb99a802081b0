//! Build-time generator for running the Go toolchain in the browser.
//!
//! Two steps are run, in order:
//!
//!   go list (js/wasm)
//!     -> lister   (base directory + manifest of std sources)
//!     -> bundle   (base64 of every file, written as a JS module)
//!   go build (js/wasm)
//!     -> builder  (cmd/go, cmd/compile, cmd/link as .wasm binaries)
//!
//! The CLI crate is a thin wrapper over [`generate::run`].

// ---------------------------------------------------------------------
// Configuration and errors
// ---------------------------------------------------------------------

pub mod config;
pub mod error;

// ---------------------------------------------------------------------
// Toolchain subprocesses
// ---------------------------------------------------------------------

pub mod toolchain;

// ---------------------------------------------------------------------
// Generation steps
// ---------------------------------------------------------------------

pub mod lister;
pub mod bundle;
pub mod builder;
pub mod generate;

#[cfg(any(test, feature = "test-util"))]
pub mod testutil;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use config::{BuildJob, GenConfig};
pub use error::GenError;
pub use generate::{GenReport, Steps, run, run_steps};
