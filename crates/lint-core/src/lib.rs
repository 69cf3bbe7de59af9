//! Composition engine for lintforge.
//!
//! Independently-authored components contribute fragments of one lint
//! configuration. This crate provides the machinery that combines them:
//!
//! - **Dependency ordering**: components declare before/after constraints;
//!   a topological sort linearizes them deterministically (`graph`).
//! - **Registry**: the [`Isolate`] owns every component and package-manager
//!   instance for one run and mediates all cross-component lookup
//!   (`isolate`).
//! - **Phased pipeline**: pre-configure, configure and post-configure
//!   passes over a shared [`ConfigArtifact`], gated on required packages
//!   being installed (`pipeline`).
//!
//! # Architecture
//!
//! ```text
//!      lint-cli / callers
//!             |
//!      lint-components
//!             |
//!         lint-core
//!          /      \
//!      lint-pm  lint-project
//! ```

pub mod artifact;
pub mod component;
pub mod error;
pub mod graph;
pub mod isolate;
pub mod pipeline;

pub use artifact::ConfigArtifact;
pub use component::{Component, ComponentHandle, ComponentId};
pub use error::{Error, Result};
pub use graph::{CycleError, DependencySorter};
pub use isolate::Isolate;
pub use pipeline::{PipelineOutcome, run_pipeline};
