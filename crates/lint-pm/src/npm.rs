//! npm support.

use crate::manager::PackageManager;

/// The npm package manager. Registered as the detection fallback default.
#[derive(Debug, Default)]
pub struct Npm;

impl PackageManager for Npm {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn executables(&self) -> &'static [&'static str] {
        &["npm", "npm-cli.js"]
    }

    fn lock_files(&self) -> &'static [&'static str] {
        &["package-lock.json", "npm-shrinkwrap.json"]
    }

    fn install_args(&self, packages: &[String]) -> Vec<String> {
        let mut args = vec!["install".to_string(), "--save-dev".to_string()];
        args.extend(packages.iter().cloned());
        args
    }
}
