//! Project root discovery and module resolution.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::PackageManifest;

/// The manifest filename marking a project root.
pub const MANIFEST_FILENAME: &str = "package.json";

/// A located project: the root directory and its parsed manifest.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    manifest: PackageManifest,
}

impl Project {
    /// Locate the project governing `start` by walking ancestor directories
    /// until a `package.json` is found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProjectNotFound`] when no ancestor holds a manifest.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            if dir.join(MANIFEST_FILENAME).is_file() {
                tracing::debug!(root = %dir.display(), "project root located");
                return Self::open(dir);
            }
        }
        Err(Error::ProjectNotFound {
            start: start.to_path_buf(),
        })
    }

    /// Open the project rooted at `root`, reading and parsing its manifest.
    pub fn open(root: &Path) -> Result<Self> {
        let manifest_path = root.join(MANIFEST_FILENAME);
        let content = fs::read_to_string(&manifest_path)?;
        let manifest = PackageManifest::parse(&content).map_err(|source| Error::ManifestParse {
            path: manifest_path,
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            manifest,
        })
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The parsed manifest.
    pub fn manifest(&self) -> &PackageManifest {
        &self.manifest
    }

    /// Whether `package` resolves as an importable module from the project
    /// root, i.e. `node_modules/<package>/package.json` exists. Scoped
    /// names (`@scope/name`) resolve through their scope directory.
    ///
    /// Resolution says nothing about whether the package is *declared*;
    /// hoisted transitive packages resolve too.
    pub fn resolves_module(&self, package: &str) -> bool {
        let mut dir = self.root.join("node_modules");
        for segment in package.split('/') {
            dir.push(segment);
        }
        dir.join(MANIFEST_FILENAME).is_file()
    }
}
