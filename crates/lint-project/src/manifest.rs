//! The subset of `package.json` the engine reads.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Parsed `package.json` fields relevant to configuration composition.
///
/// Unknown fields are ignored; missing fields default to empty so a bare
/// `{}` manifest is a valid (if useless) project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageManifest {
    /// Package name, if declared.
    pub name: Option<String>,

    /// The `packageManager` field, e.g. `"pnpm@9.1.0"`.
    pub package_manager: Option<String>,

    /// Direct runtime dependencies.
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies.
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse manifest JSON.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Whether `package` is declared as a direct or development dependency.
    pub fn declares(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }

    /// The tool named by the `packageManager` field with any `@version`
    /// suffix stripped: `"pnpm@9.1.0"` → `"pnpm"`.
    pub fn package_manager_name(&self) -> Option<&str> {
        let raw = self.package_manager.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.split_once('@') {
            Some((name, _version)) => Some(name),
            None => Some(raw),
        }
    }
}
