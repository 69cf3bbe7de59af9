//! Promise hygiene rules.

use lint_core::{Component, ConfigArtifact, Isolate, Result};
use serde_json::json;

use crate::support::plugin_rules;

/// Promise usage rules. Opt-in, no settings.
#[derive(Default)]
pub struct Promise;

impl Promise {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self)
    }

    pub fn enable(&self, isolate: &Isolate) -> Result<()> {
        isolate.enable::<Promise>()
    }
}

impl Component for Promise {
    fn name(&self) -> &'static str {
        "promise"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["eslint-plugin-promise"]
    }

    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.push_items("plugins", [json!("promise")]);
        if let Some(rules) = plugin_rules("promise") {
            config.merge_field("rules", rules);
        }
        Ok(config)
    }
}
