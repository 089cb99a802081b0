//! The generator entry point: std bundle first, then the binaries.

use std::path::PathBuf;

use log::info;

use crate::builder::build_all;
use crate::bundle::bundle_std;
use crate::config::GenConfig;
use crate::error::GenError;
use crate::lister::list_std;
use crate::toolchain::Toolchain;

/// Which of the two steps to run. Both by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    pub stdfiles: bool,
    pub bins: bool,
}

impl Default for Steps {
    fn default() -> Self {
        Steps {
            stdfiles: true,
            bins: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenReport {
    /// Distinct files in the written bundle; `None` if the step was skipped.
    pub bundled_files: Option<usize>,
    /// Length of the base64 text; `None` if the step was skipped.
    pub encoded_bytes: Option<usize>,
    pub binaries: Vec<PathBuf>,
}

/// Runs every step with the default [`Steps`].
pub fn run(config: &GenConfig) -> Result<GenReport, GenError> {
    run_steps(config, Steps::default())
}

/// Runs the selected steps in order. A failing std bundle means no build
/// is started.
pub fn run_steps(config: &GenConfig, steps: Steps) -> Result<GenReport, GenError> {
    let toolchain = Toolchain::from_config(config);
    let mut report = GenReport::default();

    if steps.stdfiles {
        info!("generating {}", config.stdfiles_path.display());
        let manifest = list_std(&toolchain)?;
        let bundle = bundle_std(&manifest, &config.stdfiles_path, &config.export_name)?;
        report.bundled_files = Some(bundle.len());
        report.encoded_bytes = Some(bundle.encoded_len());
    }

    if steps.bins {
        info!("building {} binaries into {}", config.jobs.len(), config.bin_dir.display());
        report.binaries = build_all(&toolchain, &config.bin_dir, &config.jobs)?;
    }

    Ok(report)
}
