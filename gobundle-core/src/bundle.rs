//! Base64 bundle of the listed std sources, emitted as a JS module.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};

use crate::error::GenError;
use crate::lister::StdManifest;

pub const LICENSE_HEADER: [&str; 2] = [
    "// Copyright 2020 The gobundle Authors",
    "// SPDX-License-Identifier: Apache-2.0",
];
pub const GENERATED_NOTICE: &str = "// Code generated by gobundle. DO NOT EDIT.";

/// Relative path -> base64 of the file's bytes.
///
/// Keys are unique: a path listed twice keeps the content read last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedBundle {
    files: BTreeMap<String, String>,
}

impl EncodedBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, contents: &[u8]) {
        self.files.insert(path.into(), STANDARD.encode(contents));
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total length of the encoded text.
    pub fn encoded_len(&self) -> usize {
        self.files.values().map(String::len).sum()
    }

    /// Reads every manifest entry from under `manifest.base`.
    pub fn from_manifest(manifest: &StdManifest) -> Result<Self, GenError> {
        let mut bundle = EncodedBundle::new();
        for file in &manifest.files {
            let path = manifest.base.join(file);
            let contents = fs::read(&path).map_err(|err| GenError::io(&path, err))?;
            debug!("encoding {file} ({} bytes)", contents.len());
            bundle.insert(file.as_str(), &contents);
        }
        Ok(bundle)
    }

    /// Renders the module text: license header, generated notice, then
    /// `export const <name> = <json object>` and a newline.
    pub fn to_module(&self, export_name: &str) -> Result<String, GenError> {
        let json = serde_json::to_string(&self.files)?;
        let mut module = String::with_capacity(json.len() + 256);
        for line in LICENSE_HEADER {
            module.push_str(line);
            module.push('\n');
        }
        module.push('\n');
        module.push_str(GENERATED_NOTICE);
        module.push_str("\n\n");
        module.push_str(&format!("export const {export_name} = "));
        module.push_str(&json);
        module.push('\n');
        Ok(module)
    }

    /// Creates or truncates `path` and writes the module into it.
    pub fn write_to_path(&self, path: &Path, export_name: &str) -> Result<(), GenError> {
        let module = self.to_module(export_name)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| GenError::io(parent, err))?;
            }
        }
        let file = File::create(path).map_err(|err| GenError::io(path, err))?;
        let mut out = BufWriter::new(file);
        out.write_all(module.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|err| GenError::io(path, err))
    }
}

/// Encodes every manifest file and writes the module to `out_path`.
///
/// The output file is only opened once every source has been read.
pub fn bundle_std(
    manifest: &StdManifest,
    out_path: &Path,
    export_name: &str,
) -> Result<EncodedBundle, GenError> {
    let bundle = EncodedBundle::from_manifest(manifest)?;
    bundle.write_to_path(out_path, export_name)?;
    info!(
        "wrote {} ({} files, {} encoded bytes)",
        out_path.display(),
        bundle.len(),
        bundle.encoded_len()
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    use base64::Engine as _;
    use tempfile::tempdir;

    fn module_json(module: &str) -> serde_json::Map<String, serde_json::Value> {
        let json = module
            .strip_prefix(
                "// Copyright 2020 The gobundle Authors\n\
                 // SPDX-License-Identifier: Apache-2.0\n\
                 \n\
                 // Code generated by gobundle. DO NOT EDIT.\n\
                 \n\
                 export const stdfiles = ",
            )
            .expect("module header");
        serde_json::from_str(json).expect("bundle is a json object")
    }

    #[test]
    fn encoding_preserves_arbitrary_bytes() {
        let binary: Vec<u8> = (0..=255u8).collect();
        let mut bundle = EncodedBundle::new();
        bundle.insert("empty.go", b"");
        bundle.insert("bytes.s", &binary);

        assert_eq!(bundle.get("empty.go"), Some(""));
        let decoded = STANDARD.decode(bundle.get("bytes.s").unwrap()).expect("valid base64");
        assert_eq!(decoded, binary);
    }

    #[test]
    fn duplicate_paths_keep_last_contents() {
        let mut bundle = EncodedBundle::new();
        bundle.insert("a/x.go", b"first");
        bundle.insert("a/x.go", b"second");
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get("a/x.go"), Some(STANDARD.encode("second").as_str()));
    }

    #[test]
    fn empty_bundle_renders_empty_object() {
        let module = EncodedBundle::new().to_module("stdfiles").expect("render");
        assert!(module.ends_with("export const stdfiles = {}\n"), "{module}");
        assert!(module_json(&module).is_empty());
    }

    #[test]
    fn reads_manifest_files_relative_to_base() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/x.go"), "package a\n").unwrap();
        fs::write(dir.path().join("b/y.s"), [0u8, 1, 2]).unwrap();

        let manifest = StdManifest {
            base: dir.path().to_path_buf(),
            files: vec!["a/x.go".into(), "b/y.s".into()],
        };
        let out_path = dir.path().join("gen").join("stdfiles.js");
        let bundle = bundle_std(&manifest, &out_path, "stdfiles").expect("bundle");
        assert_eq!(bundle.len(), 2);

        let module = fs::read_to_string(&out_path).expect("module written");
        let json = module_json(&module);
        assert_eq!(json.len(), 2);
        assert_eq!(json["a/x.go"], STANDARD.encode("package a\n"));
        assert_eq!(json["b/y.s"], "AAEC");
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempdir().expect("tempdir");
        let out_path = dir.path().join("stdfiles.js");
        fs::write(&out_path, "x".repeat(4096)).unwrap();

        let manifest = StdManifest {
            base: dir.path().to_path_buf(),
            files: Vec::new(),
        };
        bundle_std(&manifest, &out_path, "stdfiles").expect("bundle");
        let module = fs::read_to_string(&out_path).unwrap();
        assert!(!module.contains("xxxxxxxx"));
        assert!(module_json(&module).is_empty());
    }

    #[test]
    fn missing_source_fails_before_output_is_opened() {
        let dir = tempdir().expect("tempdir");
        let manifest = StdManifest {
            base: dir.path().to_path_buf(),
            files: vec!["missing.go".into()],
        };
        let out_path = dir.path().join("stdfiles.js");
        let err = bundle_std(&manifest, &out_path, "stdfiles").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("i/o error on {}", dir.path().join("missing.go").display())
        );
        match err {
            GenError::Io { path, .. } => assert_eq!(path, dir.path().join("missing.go")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!out_path.exists());
    }
}
