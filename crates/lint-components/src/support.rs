//! Small helpers shared by the built-in components.

use lint_core::{Error, Result};
use lint_rules::{RuleMap, resolve_plugin_rules, resolve_shared_config};
use serde_json::Value;

/// Convert a rule table into the JSON object merged under `rules`.
pub(crate) fn rule_values(rules: RuleMap) -> Value {
    Value::Object(rules.into_iter().collect())
}

/// Resolve a shared rule set a component depends on, keeping it as a
/// table. An unknown name is an error attributed to `component`, never
/// silently skipped.
pub(crate) fn required_rule_map(component: &'static str, name: &str) -> Result<RuleMap> {
    resolve_shared_config(name).ok_or_else(|| Error::Validation {
        component,
        message: format!("unknown shared config '{name}'"),
    })
}

/// Like [`required_rule_map`], already shaped for merging under `rules`.
pub(crate) fn shared_rules(component: &'static str, name: &str) -> Result<Value> {
    Ok(rule_values(required_rule_map(component, name)?))
}

/// The recommended rule set a plugin ships, if any.
pub(crate) fn plugin_rules(plugin: &str) -> Option<Value> {
    resolve_plugin_rules(plugin).map(rule_values)
}
