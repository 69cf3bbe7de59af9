//! Prettier compatibility.

use lint_core::{Component, ComponentId, ConfigArtifact, Isolate, Result};

use crate::standard::Standard;
use crate::support::shared_rules;
use crate::typescript::TypeScript;

/// Hands formatting over to prettier by switching off every stylistic rule
/// it conflicts with. Runs after the rule-producing components so the
/// switch-offs land last within the component layers; user overrides can
/// still re-enable anything.
#[derive(Default)]
pub struct Prettier;

impl Prettier {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self)
    }

    pub fn enable(&self, isolate: &Isolate) -> Result<()> {
        isolate.enable::<Prettier>()
    }
}

impl Component for Prettier {
    fn name(&self) -> &'static str {
        "prettier"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["prettier", "eslint-config-prettier"]
    }

    fn runs_after(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        Ok(vec![
            isolate.id_of::<Standard>()?,
            isolate.id_of::<TypeScript>()?,
        ])
    }

    fn post_configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.merge_field("rules", shared_rules("prettier", "prettier")?);
        Ok(config)
    }
}
