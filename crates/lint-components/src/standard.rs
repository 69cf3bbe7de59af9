//! The always-on JavaScript baseline.

use std::cell::RefCell;

use lint_core::{Component, ConfigArtifact, Isolate, Result};
use lint_rules::RuleMap;
use serde_json::{Value, json};

use crate::support::{required_rule_map, rule_values, shared_rules};

/// Core JavaScript linting: language environment, parser options and the
/// recommended base rules. Registered first and always enabled.
///
/// Extra shared rule sets can be layered on through
/// [`extend_with`](Standard::extend_with); they land after the base rules
/// and therefore win on conflict.
#[derive(Default)]
pub struct Standard {
    extra_rules: RefCell<RuleMap>,
    extended: RefCell<Vec<String>>,
}

impl Standard {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self::default())
    }

    /// Merge the named shared rule set into this component's contribution.
    ///
    /// Unknown names fail before any state changes; repeating a name
    /// already applied is a no-op.
    pub fn extend_with(&self, name: &str) -> Result<()> {
        let rules = required_rule_map("standard", name)?;
        let mut extended = self.extended.borrow_mut();
        if extended.iter().any(|applied| applied == name) {
            return Ok(());
        }
        tracing::debug!(name, "extending baseline rules");
        extended.push(name.to_string());
        self.extra_rules.borrow_mut().extend(rules);
        Ok(())
    }

    /// Names applied through [`extend_with`](Standard::extend_with), in
    /// application order.
    pub fn extended(&self) -> Vec<String> {
        self.extended.borrow().clone()
    }
}

impl Component for Standard {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".js", ".cjs", ".mjs"]
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["eslint"]
    }

    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.merge_field("env", json!({ "es2022": true }));
        config.merge_field(
            "parserOptions",
            json!({ "ecmaVersion": "latest", "sourceType": "module" }),
        );
        config.merge_field("rules", shared_rules("standard", "eslint:recommended")?);

        let extra = self.extra_rules.borrow();
        if !extra.is_empty() {
            config.merge_field("rules", rule_values(extra.clone()));
        }
        Ok(config)
    }

    fn post_configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        dedupe_plugins(&mut config);
        Ok(config)
    }
}

/// Drop repeated entries from the shared `plugins` array, keeping first
/// occurrences in order. Components append without coordinating, so the
/// baseline tidies the result once everyone has configured.
fn dedupe_plugins(config: &mut ConfigArtifact) {
    if let Some(Value::Array(plugins)) = config.get_mut("plugins") {
        let mut seen: Vec<Value> = Vec::with_capacity(plugins.len());
        plugins.retain(|plugin| {
            if seen.contains(plugin) {
                false
            } else {
                seen.push(plugin.clone());
                true
            }
        });
    }
}
