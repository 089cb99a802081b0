//! A stand-in `go` binary for tests: a shell script that answers the
//! `list` and `build` commands from a scratch GOROOT.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::GenConfig;
use crate::toolchain::Toolchain;

pub struct FakeGo {
    dir: TempDir,
}

impl Default for FakeGo {
    fn default() -> Self {
        FakeGo::new()
    }
}

impl FakeGo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let go = FakeGo { dir };
        let src = go.src_root();

        fs::create_dir_all(src.join("errors")).expect("mkdir errors");
        fs::create_dir_all(src.join("runtime")).expect("mkdir runtime");
        fs::write(src.join("errors/errors.go"), "package errors\n").expect("write errors.go");
        fs::write(src.join("runtime/proc.go"), "package runtime\n").expect("write proc.go");
        fs::write(src.join("runtime/asm_wasm.s"), [0u8, 0xff, b'\n', 0x80]).expect("write asm");

        go.set_listing(&format!(
            "dir: {src}/errors\nfile: errors.go\ndir: {src}/runtime\nfile: proc.go\nfile: asm_wasm.s\n",
            src = src.display()
        ));
        go.write_script();
        go
    }

    /// `$GOROOT/src`; parent of the runtime package directory.
    pub fn src_root(&self) -> PathBuf {
        self.dir.path().join("goroot").join("src")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn script(&self) -> PathBuf {
        self.dir.path().join("go")
    }

    pub fn set_listing(&self, listing: &str) {
        fs::write(self.dir.path().join("listing.txt"), listing).expect("write listing");
    }

    pub fn build_log(&self) -> String {
        fs::read_to_string(self.dir.path().join("build.log")).unwrap_or_default()
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(self.script().display().to_string(), "js", "wasm")
    }

    pub fn config(&self) -> GenConfig {
        let mut config = GenConfig::default();
        config.toolchain = self.script().display().to_string();
        config.stdfiles_path = self.dir.path().join("out").join("stdfiles.js");
        config.bin_dir = self.dir.path().join("out").join("bin");
        config
    }

    fn write_script(&self) {
        let script = format!(
            r#"#!/bin/sh
SRC='{src}'
STATE='{state}'
case "$1" in
env)
    echo "$GOOS/$GOARCH"
    ;;
list)
    case "$4" in
    runtime) echo "$SRC/runtime" ;;
    std) cat "$STATE/listing.txt" ;;
    *) echo "cannot find package $4" >&2; exit 1 ;;
    esac
    ;;
build)
    echo "$GOOS $GOARCH $2 $3 $4" >> "$STATE/build.log"
    case "$4" in
    cmd/go|cmd/compile|cmd/link) ;;
    *) echo "cannot find package $4" >&2; exit 1 ;;
    esac
    out="${{3#-o=}}"
    printf '\000asm%s' "$4" > "$out"
    ;;
*)
    echo "unknown command $1" >&2
    exit 2
    ;;
esac
"#,
            src = self.src_root().display(),
            state = self.dir.path().display(),
        );
        let path = self.script();
        fs::write(&path, script).expect("write fake go");
        make_executable(&path);
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod fake go");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
