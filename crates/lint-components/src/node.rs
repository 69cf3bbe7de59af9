//! Node.js environment rules.

use lint_core::{Component, ConfigArtifact, Isolate, Result};
use serde_json::json;

use crate::support::plugin_rules;

/// Node.js support: the `node` environment and the recommended rules for
/// server-side scripts. Opt-in, no settings.
#[derive(Default)]
pub struct Node;

impl Node {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self)
    }

    pub fn enable(&self, isolate: &Isolate) -> Result<()> {
        isolate.enable::<Node>()
    }
}

impl Component for Node {
    fn name(&self) -> &'static str {
        "node"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["eslint-plugin-n"]
    }

    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.merge_field("env", json!({ "node": true }));
        config.push_items("plugins", [json!("n")]);
        if let Some(rules) = plugin_rules("n") {
            config.merge_field("rules", rules);
        }
        Ok(config)
    }
}
