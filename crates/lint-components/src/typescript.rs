//! TypeScript support.

use std::cell::RefCell;

use lint_core::{Component, ComponentId, ConfigArtifact, Error, Isolate, Result};
use serde_json::json;

use crate::imports::Imports;
use crate::standard::Standard;
use crate::support::plugin_rules;

/// TypeScript linting against one or more tsconfig projects.
///
/// Sorted after the baseline so its rule overrides win, and enabling it
/// cascades to [`Imports`] for type-aware resolution.
#[derive(Default)]
pub struct TypeScript {
    projects: RefCell<Vec<String>>,
}

impl TypeScript {
    pub fn setup(_isolate: &Isolate) -> Result<Self> {
        Ok(Self::default())
    }

    /// Enable TypeScript linting against `tsconfig`.
    ///
    /// The path is validated before any state changes. Repeat calls merge:
    /// a project already added contributes one entry no matter how often it
    /// is passed.
    pub fn enable(&self, isolate: &Isolate, tsconfig: &str) -> Result<()> {
        let tsconfig = tsconfig.trim();
        if tsconfig.is_empty() {
            return Err(Error::Validation {
                component: "typescript",
                message: "a tsconfig path is required".to_string(),
            });
        }

        {
            let mut projects = self.projects.borrow_mut();
            if !projects.iter().any(|p| p == tsconfig) {
                projects.push(tsconfig.to_string());
            }
        }
        isolate.component::<Imports>()?.enable(isolate)?;
        isolate.enable::<TypeScript>()
    }

    /// The tsconfig projects added so far, in insertion order.
    pub fn projects(&self) -> Vec<String> {
        self.projects.borrow().clone()
    }
}

impl Component for TypeScript {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &[".ts", ".cts", ".mts", ".tsx"]
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &[
            "typescript",
            "@typescript-eslint/parser",
            "@typescript-eslint/eslint-plugin",
        ]
    }

    fn runs_after(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        Ok(vec![
            isolate.id_of::<Standard>()?,
            isolate.id_of::<Imports>()?,
        ])
    }

    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.insert("parser", json!("@typescript-eslint/parser"));
        config.merge_field("parserOptions", json!({ "project": self.projects() }));
        config.push_items("plugins", [json!("@typescript-eslint")]);
        if let Some(rules) = plugin_rules("@typescript-eslint") {
            config.merge_field("rules", rules);
        }
        // Core rules with TypeScript-aware replacements.
        config.merge_field(
            "rules",
            json!({
                "no-undef": "off",
                "no-unused-vars": "off",
                "no-use-before-define": "off",
            }),
        );
        Ok(config)
    }
}
