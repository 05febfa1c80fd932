// src/graph/manifest.rs

//! Cargo manifest fields used by the graph builder
//!
//! Only `package.name` and the keys of `[dependencies]` and
//! `[dev-dependencies]` matter; everything else in `Cargo.toml` is ignored.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The subset of a `Cargo.toml` the tracker reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub package: Option<PackageSection>,

    /// Dependency name -> version string or table; only the keys are used
    #[serde(default)]
    pub dependencies: BTreeMap<String, toml::Value>,

    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, toml::Value>,
}

/// `[package]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageSection {
    #[serde(default)]
    pub name: Option<String>,
}

impl Manifest {
    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Declared package name; workspace-only manifests have none
    pub fn name(&self) -> Option<&str> {
        self.package
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Names of normal dependencies
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Names of dev-only dependencies
    pub fn dev_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dev_dependencies.keys().map(String::as_str)
    }
}
