//! The `PackageManager` trait.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use lint_project::Project;

use crate::error::Result;
use crate::shell;

/// Environment variable holding the path of the package-manager executable
/// that launched the current process tree.
pub const EXEC_PATH_VAR: &str = "npm_execpath";

/// Abstraction over an external dependency-installation tool.
///
/// Detection runs a chain of heuristics, first match wins. Each step is its
/// own method so an implementation can override one step without
/// re-implementing the rest; overriding [`detect`](PackageManager::detect)
/// itself replaces the whole chain:
///
/// 1. executable-path sniffing ([`detect_by_exec_path`](PackageManager::detect_by_exec_path))
/// 2. the manifest `packageManager` field ([`detect_by_manifest`](PackageManager::detect_by_manifest))
/// 3. lock-file presence ([`detect_by_lock_file`](PackageManager::detect_by_lock_file))
pub trait PackageManager: 'static {
    /// Tool name. Also the command invoked for installs.
    fn name(&self) -> &'static str;

    /// Executable file names this manager is known to run as.
    fn executables(&self) -> &'static [&'static str];

    /// Lock files this manager writes at the project root.
    fn lock_files(&self) -> &'static [&'static str];

    /// Command-line arguments installing `packages` as development-only
    /// dependencies.
    fn install_args(&self, packages: &[String]) -> Vec<String>;

    /// The raw executable path from the environment. Overridable so tests
    /// can inject a value without mutating process state.
    fn exec_path(&self) -> Option<OsString> {
        env::var_os(EXEC_PATH_VAR)
    }

    /// Whether this manager governs `project`.
    fn detect(&self, project: &Project) -> bool {
        self.detect_by_exec_path()
            || self.detect_by_manifest(project)
            || self.detect_by_lock_file(project)
    }

    /// The active package-execution path ends with one of this manager's
    /// executable names.
    fn detect_by_exec_path(&self) -> bool {
        let Some(raw) = self.exec_path() else {
            return false;
        };
        let path = PathBuf::from(raw);
        let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
            return false;
        };
        self.executables().iter().any(|exe| file_name == *exe)
    }

    /// The manifest `packageManager` field names this manager.
    fn detect_by_manifest(&self, project: &Project) -> bool {
        project.manifest().package_manager_name() == Some(self.name())
    }

    /// One of this manager's lock files exists at the project root.
    fn detect_by_lock_file(&self, project: &Project) -> bool {
        self.lock_files()
            .iter()
            .any(|lock| project.root().join(lock).is_file())
    }

    /// Whether `package` counts as installed: it must resolve from the
    /// project root AND be declared in the manifest's direct or development
    /// dependencies. A resolvable-but-undeclared transitive package does
    /// not count.
    fn has(&self, project: &Project, package: &str) -> bool {
        project.resolves_module(package) && project.manifest().declares(package)
    }

    /// Install `packages` as development dependencies, blocking until the
    /// external command exits. Stdio is inherited so install output streams
    /// to the terminal; a non-zero exit is fatal.
    fn add(&self, project: &Project, packages: &[String]) -> Result<()> {
        shell::run_install(self.name(), &self.install_args(packages), project.root())
    }
}
