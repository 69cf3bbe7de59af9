//! The rule tables themselves. Data only.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::RuleMap;

/// Catalog of shareable configurations, constructed once on first use.
static SHARED_CONFIGS: LazyLock<HashMap<&'static str, RuleMap>> = LazyLock::new(|| {
    let mut catalog = HashMap::new();

    catalog.insert(
        "eslint:recommended",
        rules([
            ("constructor-super", json!("error")),
            ("for-direction", json!("error")),
            ("no-const-assign", json!("error")),
            ("no-dupe-args", json!("error")),
            ("no-dupe-keys", json!("error")),
            ("no-duplicate-case", json!("error")),
            ("no-empty", json!(["error", { "allowEmptyCatch": true }])),
            ("no-fallthrough", json!("error")),
            ("no-self-assign", json!("error")),
            ("no-undef", json!("error")),
            ("no-unreachable", json!("error")),
            ("no-unused-vars", json!(["error", { "args": "after-used" }])),
            ("no-use-before-define", json!(["error", { "functions": false }])),
            ("use-isnan", json!("error")),
            ("valid-typeof", json!("error")),
        ]),
    );

    catalog.insert(
        "plugin:n/recommended",
        rules([
            ("n/handle-callback-err", json!(["error", "^(err|error)$"])),
            ("n/no-deprecated-api", json!("error")),
            ("n/no-exports-assign", json!("error")),
            ("n/no-extraneous-require", json!("error")),
            ("n/no-missing-require", json!("error")),
            ("n/no-path-concat", json!("error")),
            ("n/no-unpublished-bin", json!("error")),
            ("n/process-exit-as-throw", json!("error")),
        ]),
    );

    catalog.insert(
        "plugin:import/recommended",
        rules([
            ("import/default", json!("error")),
            ("import/export", json!("error")),
            ("import/named", json!("error")),
            ("import/namespace", json!("error")),
            ("import/no-duplicates", json!("warn")),
            ("import/no-named-as-default", json!("warn")),
            ("import/no-named-as-default-member", json!("warn")),
            ("import/no-unresolved", json!("error")),
        ]),
    );

    catalog.insert(
        "plugin:@typescript-eslint/recommended",
        rules([
            ("@typescript-eslint/await-thenable", json!("error")),
            ("@typescript-eslint/ban-ts-comment", json!("error")),
            ("@typescript-eslint/no-explicit-any", json!("warn")),
            ("@typescript-eslint/no-floating-promises", json!("error")),
            ("@typescript-eslint/no-misused-new", json!("error")),
            ("@typescript-eslint/no-non-null-assertion", json!("warn")),
            (
                "@typescript-eslint/no-unused-vars",
                json!(["error", { "args": "after-used" }]),
            ),
            ("@typescript-eslint/no-var-requires", json!("error")),
        ]),
    );

    catalog.insert(
        "plugin:promise/recommended",
        rules([
            ("promise/always-return", json!("error")),
            ("promise/catch-or-return", json!("error")),
            ("promise/no-callback-in-promise", json!("warn")),
            ("promise/no-nesting", json!("warn")),
            ("promise/no-new-statics", json!("error")),
            ("promise/no-promise-in-callback", json!("warn")),
            ("promise/no-return-wrap", json!("error")),
            ("promise/param-names", json!("error")),
        ]),
    );

    // Rules prettier's formatting makes redundant; everything here is off.
    catalog.insert(
        "prettier",
        rules([
            ("arrow-parens", json!("off")),
            ("comma-dangle", json!("off")),
            ("indent", json!("off")),
            ("max-len", json!("off")),
            ("no-mixed-spaces-and-tabs", json!("off")),
            ("quotes", json!("off")),
            ("semi", json!("off")),
            ("space-before-function-paren", json!("off")),
        ]),
    );

    catalog
});

fn rules<const N: usize>(entries: [(&str, Value); N]) -> RuleMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(crate) fn shared_configs() -> &'static HashMap<&'static str, RuleMap> {
    &SHARED_CONFIGS
}
