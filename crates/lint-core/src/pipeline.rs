//! The phased pipeline driver.
//!
//! One run is a straight line: resolve the active package manager, sort the
//! registered components, run the three phases over every enabled component
//! in that order, and merge the caller's override fragment last. The only
//! soft stop is the dependency gate: missing packages are installed and the
//! run ends with [`PipelineOutcome::NeedsRestart`], leaving the decision to
//! terminate the process to the host.

use tracing::{debug, warn};

use crate::artifact::ConfigArtifact;
use crate::error::Result;
use crate::isolate::Isolate;

/// The terminal state of a pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Every required package was present; the final merged artifact.
    Ready(ConfigArtifact),
    /// Missing packages were installed. The whole pipeline must be re-run
    /// by a fresh invocation; nothing configured in this run is usable.
    NeedsRestart {
        /// Packages handed to the install command, in first-declared order.
        installed: Vec<String>,
    },
}

/// Run the three configuration phases over every enabled component in
/// dependency order, gated on package availability.
///
/// `overrides` is the caller's fragment. It is merged last and only last:
/// its fields win over component-produced fields, arrays concatenate.
pub fn run_pipeline(isolate: &Isolate, overrides: ConfigArtifact) -> Result<PipelineOutcome> {
    let manager = isolate.find_package_manager()?;
    let order = isolate.sorted_components()?;
    debug!(
        components = order.len(),
        manager = manager.name(),
        "pipeline start"
    );

    // Phase 1: side effects. Components may enable others mid-pass, so the
    // enabled flag is checked at each component's own turn: an enable that
    // lands on an already-visited component takes effect in later phases
    // only, while components further down the order see it immediately.
    for handle in &order {
        if isolate.is_enabled(handle.id) {
            handle.component.pre_configure(isolate)?;
        }
    }

    // Dependency gate: the union of enabled components' requirements the
    // active manager does not report installed, deduplicated, in
    // first-declared order.
    let project = isolate.project()?;
    let mut missing: Vec<String> = Vec::new();
    for handle in &order {
        if !isolate.is_enabled(handle.id) {
            continue;
        }
        for &dep in handle.component.dependencies() {
            if missing.iter().any(|m| m == dep) {
                continue;
            }
            if !manager.has(project, dep) {
                missing.push(dep.to_string());
            }
        }
    }
    if !missing.is_empty() {
        warn!(
            packages = %missing.join(", "),
            "installing missing packages; the run must be repeated once the install completes"
        );
        manager.add(project, &missing)?;
        return Ok(PipelineOutcome::NeedsRestart { installed: missing });
    }

    // Phase 2: every enabled component folds its contribution into the
    // artifact, strictly sequentially in sorted order.
    let mut config = ConfigArtifact::new();
    for handle in &order {
        if isolate.is_enabled(handle.id) {
            config = handle.component.configure(isolate, config)?;
        }
    }

    // Phase 3: final adjustments, same order.
    for handle in &order {
        if isolate.is_enabled(handle.id) {
            config = handle.component.post_configure(isolate, config)?;
        }
    }

    config.merge(overrides);
    Ok(PipelineOutcome::Ready(config))
}
