//! Cross-compilation of toolchain commands to `GOOS=js GOARCH=wasm`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::BuildJob;
use crate::error::GenError;
use crate::toolchain::Toolchain;

/// Builds each job in order into `bin_dir`, stopping at the first failure.
///
/// Returns the paths of the binaries written.
pub fn build_all(
    toolchain: &Toolchain,
    bin_dir: &Path,
    jobs: &[BuildJob],
) -> Result<Vec<PathBuf>, GenError> {
    fs::create_dir_all(bin_dir).map_err(|err| GenError::io(bin_dir, err))?;

    let mut written = Vec::with_capacity(jobs.len());
    for job in jobs {
        let output = bin_dir.join(&job.name);
        info!("building {} -> {}", job.package, output.display());
        build_one(toolchain, &output, &job.package)?;
        written.push(output);
    }
    Ok(written)
}

fn build_one(toolchain: &Toolchain, output: &Path, package: &str) -> Result<(), GenError> {
    let output = output
        .to_str()
        .ok_or_else(|| GenError::NonUtf8Path(output.to_path_buf()))?;
    let out_flag = format!("-o={output}");
    toolchain.run(&["build", "-trimpath", &out_flag, package])
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::FakeGo;

    #[test]
    fn builds_default_jobs_in_order() {
        let go = FakeGo::new();
        let bin_dir = go.path().join("bin");
        let jobs = BuildJob::defaults("1.14beta1");

        let written = build_all(&go.toolchain(), &bin_dir, &jobs).expect("builds succeed");
        assert_eq!(
            written,
            vec![
                bin_dir.join("go1.14beta1.wasm"),
                bin_dir.join("compile1.14beta1.wasm"),
                bin_dir.join("link1.14beta1.wasm"),
            ]
        );
        let binary = fs::read(bin_dir.join("compile1.14beta1.wasm")).expect("binary written");
        assert!(binary.starts_with(b"\0asm"));

        let log = go.build_log();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            format!("js wasm -trimpath -o={} cmd/go", bin_dir.join("go1.14beta1.wasm").display())
        );
        assert!(lines[1].ends_with(" cmd/compile"));
        assert!(lines[2].ends_with(" cmd/link"));
    }

    #[test]
    fn first_failing_job_stops_the_rest() {
        let go = FakeGo::new();
        let bin_dir = go.path().join("bin");
        let jobs = vec![
            BuildJob::new("go.wasm", "cmd/go"),
            BuildJob::new("bad.wasm", "cmd/doesnotexist"),
            BuildJob::new("link.wasm", "cmd/link"),
        ];

        let err = build_all(&go.toolchain(), &bin_dir, &jobs).unwrap_err();
        assert!(matches!(err, GenError::ExitStatus { .. }), "got {err:?}");

        assert_eq!(go.build_log().lines().count(), 2);
        assert!(bin_dir.join("go.wasm").exists());
        assert!(!bin_dir.join("link.wasm").exists());
    }

    #[test]
    fn empty_job_list_builds_nothing() {
        let go = FakeGo::new();
        let written = build_all(&go.toolchain(), &go.path().join("bin"), &[]).expect("no-op");
        assert!(written.is_empty());
        assert!(go.build_log().is_empty());
    }
}
