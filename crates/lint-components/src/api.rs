//! The `define_config` entry point and its callback API.

use std::path::Path;

use lint_core::{ConfigArtifact, Isolate, PipelineOutcome, Result, run_pipeline};
use lint_pm::{Npm, Pnpm, Yarn};

use crate::imports::Imports;
use crate::node::Node;
use crate::prettier::Prettier;
use crate::promise::Promise;
use crate::standard::Standard;
use crate::typescript::TypeScript;

/// Register the built-in components and package managers and enable the
/// always-on baseline.
pub fn register_builtins(isolate: &Isolate) -> Result<()> {
    isolate.register(Standard::setup)?;
    isolate.register(Imports::setup)?;
    isolate.register(Node::setup)?;
    isolate.register(TypeScript::setup)?;
    isolate.register(Promise::setup)?;
    isolate.register(Prettier::setup)?;

    isolate.register_package_manager(|_| Ok(Npm), true)?;
    isolate.register_package_manager(|_| Ok(Yarn), false)?;
    isolate.register_package_manager(|_| Ok(Pnpm), false)?;

    isolate.enable::<Standard>()?;
    isolate.enable::<Imports>()?;
    Ok(())
}

/// The API handed to the [`define_config`] callback: one enabling method
/// per optional component, plus `extend` for extra shared rule sets.
pub struct ConfigApi<'a> {
    isolate: &'a Isolate,
}

impl<'a> ConfigApi<'a> {
    pub(crate) fn new(isolate: &'a Isolate) -> Self {
        Self { isolate }
    }

    /// The underlying registry, for advanced composition.
    pub fn isolate(&self) -> &Isolate {
        self.isolate
    }

    /// Merge the named shared rule set into the baseline rules.
    pub fn extend(&self, name: &str) -> Result<()> {
        self.isolate.component::<Standard>()?.extend_with(name)
    }

    /// Enable Node.js rules.
    pub fn use_node(&self) -> Result<()> {
        self.isolate.component::<Node>()?.enable(self.isolate)
    }

    /// Enable TypeScript linting against `tsconfig`. Repeatable; each call
    /// adds a project.
    pub fn use_typescript(&self, tsconfig: &str) -> Result<()> {
        self.isolate
            .component::<TypeScript>()?
            .enable(self.isolate, tsconfig)
    }

    /// Enable promise-hygiene rules.
    pub fn use_promise(&self) -> Result<()> {
        self.isolate.component::<Promise>()?.enable(self.isolate)
    }

    /// Enable prettier compatibility.
    pub fn use_prettier(&self) -> Result<()> {
        self.isolate.component::<Prettier>()?.enable(self.isolate)
    }
}

/// Compose a configuration for the project governing `base_dir`.
///
/// Registers the built-ins, runs `build` to enable optional components and
/// collect the caller's override fragment, then drives the pipeline. The
/// override fragment is merged last: its fields win over everything the
/// components produced, with arrays concatenated.
///
/// A [`PipelineOutcome::NeedsRestart`] return means missing packages were
/// installed and the whole run must be repeated; whether that terminates
/// the process is the caller's decision, not this function's.
pub fn define_config<F>(base_dir: impl AsRef<Path>, build: F) -> Result<PipelineOutcome>
where
    F: FnOnce(&ConfigApi) -> Result<ConfigArtifact>,
{
    let isolate = Isolate::new(base_dir.as_ref());
    register_builtins(&isolate)?;

    let api = ConfigApi::new(&isolate);
    let overrides = build(&api)?;

    run_pipeline(&isolate, overrides)
}
