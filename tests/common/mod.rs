// tests/common/mod.rs

//! Shared test utilities for integration tests.

#![allow(dead_code)]

use bazel_progress::TrackerConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway Cargo source tree.
///
/// Keep the value alive for the duration of the test to prevent cleanup.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `rel` (creating parent directories) with `content`
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        self.write_bytes(rel, content.as_bytes())
    }

    /// Write raw bytes to `rel`, for content that is not valid UTF-8
    pub fn write_bytes(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Add `<dir>/Cargo.toml` declaring `name` with path dependencies
    pub fn package(&self, dir: &str, name: &str, deps: &[&str], dev_deps: &[&str]) {
        let mut manifest = format!("[package]\nname = \"{name}\"\nversion = \"0.1.0\"\n");
        manifest.push_str("\n[dependencies]\n");
        for dep in deps {
            manifest.push_str(&format!("{dep} = {{ path = \"../{dep}\" }}\n"));
        }
        manifest.push_str("\n[dev-dependencies]\n");
        for dep in dev_deps {
            manifest.push_str(&format!("{dep} = {{ path = \"../{dep}\" }}\n"));
        }
        self.write(&format!("{dir}/Cargo.toml"), &manifest);
    }

    /// Add a `rust_library` rule building `crate_name` in `<dir>/BUILD.bazel`
    pub fn library_rule(&self, dir: &str, crate_name: &str) {
        self.write(
            &format!("{dir}/BUILD.bazel"),
            &format!(
                concat!(
                    "load(\"@rules_rust//rust:defs.bzl\", \"rust_library\")\n\n",
                    "rust_library(\n",
                    "    name = \"{crate_name}\",\n",
                    "    srcs = glob([\"src/**\"]),\n",
                    ")\n",
                ),
                crate_name = crate_name
            ),
        );
    }

    /// Config pointed at this tree, with report outputs inside it
    pub fn config(&self) -> TrackerConfig {
        TrackerConfig {
            source_dir: self.path().to_path_buf(),
            csv_output: self.path().join("out").join("progress.csv"),
            graph_output: self.path().join("out").join("progress.dot"),
            ..Default::default()
        }
    }
}
