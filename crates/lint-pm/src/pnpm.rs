//! pnpm support.

use crate::manager::PackageManager;

/// The pnpm package manager.
#[derive(Debug, Default)]
pub struct Pnpm;

impl PackageManager for Pnpm {
    fn name(&self) -> &'static str {
        "pnpm"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["pnpm", "pnpm.cjs"]
    }

    fn lock_files(&self) -> &'static [&'static str] {
        &["pnpm-lock.yaml"]
    }

    fn install_args(&self, packages: &[String]) -> Vec<String> {
        let mut args = vec!["add".to_string(), "--save-dev".to_string()];
        args.extend(packages.iter().cloned());
        args
    }
}
