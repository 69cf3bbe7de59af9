//! yarn support.

use crate::manager::PackageManager;

/// The yarn package manager.
#[derive(Debug, Default)]
pub struct Yarn;

impl PackageManager for Yarn {
    fn name(&self) -> &'static str {
        "yarn"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["yarn", "yarn.js"]
    }

    fn lock_files(&self) -> &'static [&'static str] {
        &["yarn.lock"]
    }

    fn install_args(&self, packages: &[String]) -> Vec<String> {
        let mut args = vec!["add".to_string(), "--dev".to_string()];
        args.extend(packages.iter().cloned());
        args
    }
}
