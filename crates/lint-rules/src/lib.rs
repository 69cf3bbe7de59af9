//! Shareable rule tables and their resolution service.
//!
//! The engine treats rule content as opaque data: components ask for a rule
//! set by name and merge whatever comes back into the artifact. This crate
//! owns the concrete tables and the lookup functions.

mod tables;

use std::collections::BTreeMap;

use serde_json::Value;

/// Rules keyed by name. Each value is a severity (`"error"`, `"warn"`,
/// `"off"`) or a `[severity, options…]` tuple, exactly as it appears in the
/// emitted configuration.
pub type RuleMap = BTreeMap<String, Value>;

/// Resolve a shareable configuration name (`"eslint:recommended"`,
/// `"plugin:promise/recommended"`, `"prettier"`, …) to its rule table.
pub fn resolve_shared_config(name: &str) -> Option<RuleMap> {
    tables::shared_configs().get(name).cloned()
}

/// Rules contributed by a plugin's recommended preset, if the plugin ships
/// one.
pub fn resolve_plugin_rules(plugin: &str) -> Option<RuleMap> {
    resolve_shared_config(&format!("plugin:{plugin}/recommended"))
}
