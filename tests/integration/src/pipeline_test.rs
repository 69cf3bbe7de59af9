//! End-to-end configuration runs against on-disk fixture projects.

use std::fs;
use std::path::Path;

use lint_components::define_config;
use lint_core::{ConfigArtifact, Error, PipelineOutcome};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const BASELINE_DEPS: &[&str] = &["eslint", "eslint-plugin-import"];

/// A project whose manifest declares `deps` as devDependencies, with each
/// one resolvable under `node_modules`.
fn fixture(deps: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let dev_deps: serde_json::Map<String, Value> =
        deps.iter().map(|dep| (dep.to_string(), json!("*"))).collect();
    let manifest = json!({ "name": "fixture", "devDependencies": dev_deps });
    fs::write(temp.path().join("package.json"), manifest.to_string()).unwrap();
    for dep in deps {
        add_module(temp.path(), dep);
    }
    temp
}

fn add_module(root: &Path, package: &str) {
    let mut dir = root.join("node_modules");
    for segment in package.split('/') {
        dir.push(segment);
    }
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), "{}").unwrap();
}

fn ready(outcome: PipelineOutcome) -> Value {
    match outcome {
        PipelineOutcome::Ready(config) => config.into_value(),
        PipelineOutcome::NeedsRestart { installed } => {
            panic!("expected Ready, got NeedsRestart({installed:?})")
        }
    }
}

#[test]
fn baseline_run_produces_the_core_artifact() {
    let temp = fixture(BASELINE_DEPS);

    let outcome = define_config(temp.path(), |_api| {
        let mut overrides = ConfigArtifact::new();
        overrides.insert("root", json!(true));
        Ok(overrides)
    })
    .unwrap();

    let config = ready(outcome);
    assert_eq!(config["root"], json!(true));
    assert_eq!(config["env"], json!({ "es2022": true }));
    assert_eq!(config["plugins"], json!(["import"]));
    assert_eq!(config["rules"]["no-undef"], json!("error"));
    assert_eq!(config["rules"]["import/no-unresolved"], json!("error"));
    assert_eq!(
        config["settings"]["import/resolver"]["node"]["extensions"],
        json!([".js", ".cjs", ".mjs"])
    );
}

#[test]
fn typescript_run_layers_overrides_after_the_baseline() {
    let mut deps = BASELINE_DEPS.to_vec();
    deps.extend([
        "typescript",
        "@typescript-eslint/parser",
        "@typescript-eslint/eslint-plugin",
    ]);
    let temp = fixture(&deps);

    let outcome = define_config(temp.path(), |api| {
        api.use_typescript("./tsconfig.json")?;
        Ok(ConfigArtifact::new())
    })
    .unwrap();

    let config = ready(outcome);
    assert_eq!(config["parser"], json!("@typescript-eslint/parser"));
    assert_eq!(config["parserOptions"]["project"], json!(["./tsconfig.json"]));
    // parserOptions deep-merges: the baseline's fields survive alongside
    // the project list.
    assert_eq!(config["parserOptions"]["sourceType"], json!("module"));
    assert_eq!(config["plugins"], json!(["import", "@typescript-eslint"]));
    // TypeScript sorts after the baseline, so its core-rule switch-offs win.
    assert_eq!(config["rules"]["no-unused-vars"], json!("off"));
    assert_eq!(
        config["rules"]["@typescript-eslint/no-unused-vars"],
        json!(["error", { "args": "after-used" }])
    );
    assert_eq!(
        config["settings"]["import/resolver"]["typescript"],
        json!({ "alwaysTryTypes": true })
    );
    assert_eq!(
        config["settings"]["import/resolver"]["node"]["extensions"],
        json!([".js", ".cjs", ".mjs", ".ts", ".cts", ".mts", ".tsx"])
    );
}

#[test]
fn node_and_promise_components_contribute_their_layers() {
    let mut deps = BASELINE_DEPS.to_vec();
    deps.extend(["eslint-plugin-n", "eslint-plugin-promise"]);
    let temp = fixture(&deps);

    let outcome = define_config(temp.path(), |api| {
        api.use_node()?;
        api.use_promise()?;
        Ok(ConfigArtifact::new())
    })
    .unwrap();

    let config = ready(outcome);
    assert_eq!(config["env"], json!({ "node": true, "es2022": true }));
    assert_eq!(config["plugins"], json!(["promise", "n", "import"]));
    assert_eq!(config["rules"]["n/no-deprecated-api"], json!("error"));
    assert_eq!(config["rules"]["promise/catch-or-return"], json!("error"));
}

#[test]
fn user_fragment_wins_over_component_rules() {
    let temp = fixture(BASELINE_DEPS);

    let outcome = define_config(temp.path(), |api| {
        api.extend("plugin:promise/recommended")?;
        let mut overrides = ConfigArtifact::new();
        overrides.merge_field("rules", json!({ "no-undef": "warn" }));
        overrides.push_items("plugins", [json!("local-plugin")]);
        Ok(overrides)
    })
    .unwrap();

    let config = ready(outcome);
    assert_eq!(config["rules"]["no-undef"], json!("warn"));
    assert_eq!(config["rules"]["promise/param-names"], json!("error"));
    assert_eq!(config["plugins"], json!(["import", "local-plugin"]));
}

#[test]
fn prettier_switchoffs_yield_to_user_overrides() {
    let mut deps = BASELINE_DEPS.to_vec();
    deps.extend(["prettier", "eslint-config-prettier"]);
    let temp = fixture(&deps);

    let outcome = define_config(temp.path(), |api| {
        api.use_prettier()?;
        let mut overrides = ConfigArtifact::new();
        overrides.merge_field("rules", json!({ "semi": ["error", "always"] }));
        Ok(overrides)
    })
    .unwrap();

    let config = ready(outcome);
    // Prettier switched the stylistic rules off during post-configure.
    assert_eq!(config["rules"]["quotes"], json!("off"));
    // The user's fragment still has the last word.
    assert_eq!(config["rules"]["semi"], json!(["error", "always"]));
}

#[test]
fn repeated_enables_leave_the_artifact_unchanged() {
    let mut deps = BASELINE_DEPS.to_vec();
    deps.extend([
        "typescript",
        "@typescript-eslint/parser",
        "@typescript-eslint/eslint-plugin",
    ]);

    let once = {
        let temp = fixture(&deps);
        ready(
            define_config(temp.path(), |api| {
                api.use_typescript("./tsconfig.json")?;
                Ok(ConfigArtifact::new())
            })
            .unwrap(),
        )
    };
    let twice = {
        let temp = fixture(&deps);
        ready(
            define_config(temp.path(), |api| {
                api.use_typescript("./tsconfig.json")?;
                api.use_typescript("./tsconfig.json")?;
                Ok(ConfigArtifact::new())
            })
            .unwrap(),
        )
    };

    assert_eq!(once, twice);
}

#[test]
fn invalid_enable_arguments_fail_before_the_pipeline() {
    let temp = fixture(BASELINE_DEPS);

    let err = define_config(temp.path(), |api| {
        api.use_typescript("  ")?;
        Ok(ConfigArtifact::new())
    })
    .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got: {err:?}");
}

#[test]
fn unknown_extend_name_fails_before_the_pipeline() {
    let temp = fixture(BASELINE_DEPS);

    let err = define_config(temp.path(), |api| {
        api.extend("plugin:does-not-exist/recommended")?;
        Ok(ConfigArtifact::new())
    })
    .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got: {err:?}");
}

#[test]
fn missing_project_root_is_fatal() {
    let temp = TempDir::new().unwrap();

    let err = define_config(temp.path().join("nested"), |_api| Ok(ConfigArtifact::new()))
        .unwrap_err();
    assert!(
        matches!(
            err,
            Error::Project(lint_project::Error::ProjectNotFound { .. })
        ),
        "got: {err:?}"
    );
}
