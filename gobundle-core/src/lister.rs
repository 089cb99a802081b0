//! Discovery of the standard library sources for the target platform.
//!
//! `go list` is asked twice: once for the runtime package directory, whose
//! parent (`$GOROOT/src`) becomes the base for relative paths, and once for
//! every `.go` and `.s` file in the `std` package set.

use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use crate::error::GenError;
use crate::toolchain::Toolchain;

const DIR_PREFIX: &str = "dir:";
const FILE_PREFIX: &str = "file:";

/// `go list` template yielding one `dir:` line per package followed by a
/// `file:` line for each of its Go and assembly sources.
pub const STD_LISTING_FORMAT: &str = "dir: {{.Dir}}\n{{range .GoFiles}}file: {{.}}\n{{end}}{{range .SFiles}}file: {{.}}\n{{end}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdManifest {
    /// Directory every entry of `files` is relative to.
    pub base: PathBuf,
    /// Relative paths in the order the toolchain reported them. Not
    /// deduplicated.
    pub files: Vec<String>,
}

pub fn list_std(toolchain: &Toolchain) -> Result<StdManifest, GenError> {
    let base = runtime_parent(toolchain)?;
    info!("listing std sources relative to {}", base.display());

    let listing = toolchain.output(&["list", "-f", STD_LISTING_FORMAT, "std"])?;
    let files = parse_listing(&listing, &base)?;
    debug!("{} std source files listed", files.len());
    Ok(StdManifest { base, files })
}

/// Parent directory of the target's `runtime` package.
pub fn runtime_parent(toolchain: &Toolchain) -> Result<PathBuf, GenError> {
    let out = toolchain.output(&["list", "-f", "{{.Dir}}", "runtime"])?;
    let runtime_dir = Path::new(out.trim()).join("..");
    Ok(clean(&runtime_dir).iter().collect())
}

/// Parses `dir:`/`file:` lines into paths relative to `base`.
///
/// A `file:` line is resolved against the most recent `dir:` line. One that
/// comes before any `dir:` line is resolved against an empty directory, so
/// with an absolute `base` it fails as [`GenError::RelativePath`]. Other
/// lines are ignored.
pub fn parse_listing(listing: &str, base: &Path) -> Result<Vec<String>, GenError> {
    let mut files = Vec::new();
    let mut dir = PathBuf::new();
    for line in listing.split('\n') {
        if let Some(rest) = line.strip_prefix(DIR_PREFIX) {
            dir = PathBuf::from(rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix(FILE_PREFIX) {
            let file = dir.join(rest.trim());
            files.push(relative_to(base, &file)?);
        }
    }
    Ok(files)
}

/// Lexically computes `target` relative to `base`, joined with `/`.
///
/// Both paths must be absolute or both relative. The result climbs out
/// of `base` with `..` where needed; a `base` that itself climbs past the
/// shared prefix cannot be expressed and is an error.
pub fn relative_to(base: &Path, target: &Path) -> Result<String, GenError> {
    let error = || GenError::RelativePath {
        base: base.to_path_buf(),
        target: target.to_path_buf(),
    };
    if base.has_root() != target.has_root() {
        return Err(error());
    }

    let base_parts = clean(base);
    let target_parts = clean(target);
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(b, t)| b == t)
        .count();

    let mut parts = Vec::new();
    for part in &base_parts[common..] {
        if *part == Component::ParentDir {
            return Err(error());
        }
        parts.push("..");
    }
    for part in &target_parts[common..] {
        let part = part
            .as_os_str()
            .to_str()
            .ok_or_else(|| GenError::NonUtf8Path(target.to_path_buf()))?;
        parts.push(part);
    }

    if parts.is_empty() {
        return Ok(".".to_string());
    }
    Ok(parts.join("/"))
}

/// Lexical normalization: drops `.`, folds `name/..`, and drops `..`
/// directly under the root.
fn clean(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts
}
