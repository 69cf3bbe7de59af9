//! Import hygiene rules and resolver wiring.

use std::cell::Cell;

use lint_core::{Component, ComponentId, ConfigArtifact, Isolate, Result};
use serde_json::{Value, json};

use crate::support::plugin_rules;
use crate::typescript::TypeScript;

/// Import ordering and resolution rules. Always enabled.
///
/// The resolver settings aggregate the file extensions of every enabled
/// component, so enabling TypeScript automatically teaches the resolver
/// about `.ts` files.
#[derive(Default)]
pub struct Imports {
    typescript_aware: Cell<bool>,
}

impl Imports {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self::default())
    }

    pub fn enable(&self, isolate: &Isolate) -> Result<()> {
        isolate.enable::<Imports>()
    }
}

impl Component for Imports {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["eslint-plugin-import"]
    }

    fn runs_before(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        // TypeScript overrides import rules, so it must come later.
        Ok(vec![isolate.id_of::<TypeScript>()?])
    }

    fn pre_configure(&self, isolate: &Isolate) -> Result<()> {
        // TypeScript may have been enabled by anything running earlier in
        // this pass; the flag is sampled at this component's own turn.
        self.typescript_aware
            .set(isolate.component_enabled::<TypeScript>()?);
        Ok(())
    }

    fn configure(&self, isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.push_items("plugins", [json!("import")]);
        if let Some(rules) = plugin_rules("import") {
            config.merge_field("rules", rules);
        }

        let mut extensions: Vec<Value> = Vec::new();
        for handle in isolate.sorted_components()? {
            if !isolate.is_enabled(handle.id) {
                continue;
            }
            for ext in handle.component.file_extensions() {
                let ext = json!(ext);
                if !extensions.contains(&ext) {
                    extensions.push(ext);
                }
            }
        }
        let mut resolver = json!({ "node": { "extensions": extensions } });
        if self.typescript_aware.get() {
            resolver["typescript"] = json!({ "alwaysTryTypes": true });
        }
        config.merge_field("settings", json!({ "import/resolver": resolver }));
        Ok(config)
    }
}
