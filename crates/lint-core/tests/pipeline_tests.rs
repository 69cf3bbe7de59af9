//! Pipeline behavior against stub components and a scripted package
//! manager: phase ordering, the dependency gate, re-entrant enabling and
//! override merging.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::rc::Rc;

use lint_core::{
    Component, ComponentId, ConfigArtifact, Error, Isolate, PipelineOutcome, Result, run_pipeline,
};
use lint_pm::PackageManager;
use lint_project::Project;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

/// Package manager with a scripted installed set. Records install calls
/// instead of shelling out.
struct ScriptedManager {
    present: HashSet<String>,
    fail_install: bool,
    added: RefCell<Vec<Vec<String>>>,
}

impl PackageManager for ScriptedManager {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn executables(&self) -> &'static [&'static str] {
        &[]
    }

    fn lock_files(&self) -> &'static [&'static str] {
        &[]
    }

    fn install_args(&self, packages: &[String]) -> Vec<String> {
        packages.to_vec()
    }

    fn detect(&self, _project: &Project) -> bool {
        true
    }

    fn has(&self, _project: &Project, package: &str) -> bool {
        self.present.contains(package)
    }

    fn add(&self, _project: &Project, packages: &[String]) -> lint_pm::Result<()> {
        self.added.borrow_mut().push(packages.to_vec());
        if self.fail_install {
            return Err(lint_pm::Error::InstallFailed {
                manager: "scripted".to_string(),
                command: "scripted install".to_string(),
                exit_code: Some(1),
            });
        }
        Ok(())
    }
}

fn isolate_in(temp: &TempDir) -> Isolate {
    fs::write(temp.path().join("package.json"), "{}").unwrap();
    Isolate::new(temp.path())
}

fn scripted(isolate: &Isolate, present: &[&str], fail_install: bool) -> Rc<ScriptedManager> {
    let present: HashSet<String> = present.iter().map(|s| s.to_string()).collect();
    isolate
        .register_package_manager(
            move |_| {
                Ok(ScriptedManager {
                    present,
                    fail_install,
                    added: RefCell::new(Vec::new()),
                })
            },
            false,
        )
        .unwrap()
}

fn ready_artifact(outcome: PipelineOutcome) -> ConfigArtifact {
    match outcome {
        PipelineOutcome::Ready(config) => config,
        PipelineOutcome::NeedsRestart { installed } => {
            panic!("expected Ready, got NeedsRestart({installed:?})")
        }
    }
}

struct First;
impl Component for First {
    fn name(&self) -> &'static str {
        "first"
    }
    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.insert("winner", json!("first"));
        config.push_items("trail", [json!("first")]);
        Ok(config)
    }
}

struct Second;
impl Component for Second {
    fn name(&self) -> &'static str {
        "second"
    }
    fn runs_after(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        Ok(vec![isolate.id_of::<First>()?])
    }
    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.insert("winner", json!("second"));
        config.push_items("trail", [json!("second")]);
        Ok(config)
    }
}

#[test]
fn later_sorted_component_wins_contested_fields() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], false);
    isolate.register(|_| Ok(First)).unwrap();
    isolate.register(|_| Ok(Second)).unwrap();
    isolate.enable::<First>().unwrap();
    isolate.enable::<Second>().unwrap();

    let config = ready_artifact(run_pipeline(&isolate, ConfigArtifact::new()).unwrap());
    assert_eq!(config.get("winner"), Some(&json!("second")));
    assert_eq!(config.get("trail"), Some(&json!(["first", "second"])));
}

#[test]
fn user_overrides_win_and_arrays_concatenate() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], false);
    isolate.register(|_| Ok(First)).unwrap();
    isolate.register(|_| Ok(Second)).unwrap();
    isolate.enable::<First>().unwrap();
    isolate.enable::<Second>().unwrap();

    let mut overrides = ConfigArtifact::new();
    overrides.insert("winner", json!("user"));
    overrides.push_items("trail", [json!("user")]);

    let config = ready_artifact(run_pipeline(&isolate, overrides).unwrap());
    assert_eq!(config.get("winner"), Some(&json!("user")));
    assert_eq!(config.get("trail"), Some(&json!(["first", "second", "user"])));
}

#[test]
fn disabled_components_contribute_nothing() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], false);
    isolate.register(|_| Ok(First)).unwrap();
    isolate.register(|_| Ok(Second)).unwrap();
    isolate.enable::<First>().unwrap();

    let config = ready_artifact(run_pipeline(&isolate, ConfigArtifact::new()).unwrap());
    assert_eq!(config.get("winner"), Some(&json!("first")));
    assert_eq!(config.get("trail"), Some(&json!(["first"])));
}

#[derive(Default)]
struct NeedsPkgs {
    configured: Cell<bool>,
}
impl Component for NeedsPkgs {
    fn name(&self) -> &'static str {
        "needs-pkgs"
    }
    fn dependencies(&self) -> &'static [&'static str] {
        &["pkg-x", "pkg-y"]
    }
    fn configure(&self, _isolate: &Isolate, config: ConfigArtifact) -> Result<ConfigArtifact> {
        self.configured.set(true);
        Ok(config)
    }
}

#[derive(Default)]
struct AlsoNeeds;
impl Component for AlsoNeeds {
    fn name(&self) -> &'static str {
        "also-needs"
    }
    fn dependencies(&self) -> &'static [&'static str] {
        &["pkg-y", "pkg-z"]
    }
}

#[test]
fn missing_dependencies_install_once_and_request_a_restart() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    let manager = scripted(&isolate, &["pkg-z"], false);
    let needs = isolate.register(|_| Ok(NeedsPkgs::default())).unwrap();
    isolate.register(|_| Ok(AlsoNeeds)).unwrap();
    isolate.enable::<NeedsPkgs>().unwrap();
    isolate.enable::<AlsoNeeds>().unwrap();

    let outcome = run_pipeline(&isolate, ConfigArtifact::new()).unwrap();

    // Unconstrained components sort most-recent-first, so also-needs is
    // visited before needs-pkgs: pkg-y is declared first, pkg-z is already
    // present, pkg-x joins from needs-pkgs, and the duplicate pkg-y is
    // dropped.
    let expected = vec!["pkg-y".to_string(), "pkg-x".to_string()];
    match outcome {
        PipelineOutcome::NeedsRestart { installed } => assert_eq!(installed, expected),
        PipelineOutcome::Ready(_) => panic!("expected NeedsRestart"),
    }
    assert_eq!(*manager.added.borrow(), vec![expected]);

    // Configuration phases must not run after the gate fires.
    assert!(!needs.configured.get());
}

#[test]
fn satisfied_dependencies_do_not_trigger_installs() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    let manager = scripted(&isolate, &["pkg-x", "pkg-y"], false);
    let needs = isolate.register(|_| Ok(NeedsPkgs::default())).unwrap();
    isolate.enable::<NeedsPkgs>().unwrap();

    ready_artifact(run_pipeline(&isolate, ConfigArtifact::new()).unwrap());
    assert!(manager.added.borrow().is_empty());
    assert!(needs.configured.get());
}

#[test]
fn disabled_component_dependencies_are_not_gated() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    let manager = scripted(&isolate, &[], false);
    isolate.register(|_| Ok(NeedsPkgs::default())).unwrap();

    ready_artifact(run_pipeline(&isolate, ConfigArtifact::new()).unwrap());
    assert!(manager.added.borrow().is_empty());
}

#[test]
fn failed_install_propagates_as_an_error() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], true);
    isolate.register(|_| Ok(NeedsPkgs::default())).unwrap();
    isolate.enable::<NeedsPkgs>().unwrap();

    let err = run_pipeline(&isolate, ConfigArtifact::new()).unwrap_err();
    assert!(
        matches!(err, Error::Pm(lint_pm::Error::InstallFailed { .. })),
        "got: {err:?}"
    );
}

struct Enabler;
impl Component for Enabler {
    fn name(&self) -> &'static str {
        "enabler"
    }
    fn pre_configure(&self, isolate: &Isolate) -> Result<()> {
        isolate.enable::<EarlySeat>()?;
        isolate.enable::<LateSeat>()?;
        Ok(())
    }
    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.push_items("trail", [json!("enabler")]);
        Ok(config)
    }
}

#[derive(Default)]
struct EarlySeat {
    pre_ran: Cell<bool>,
}
impl Component for EarlySeat {
    fn name(&self) -> &'static str {
        "early"
    }
    fn runs_before(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        Ok(vec![isolate.id_of::<Enabler>()?])
    }
    fn pre_configure(&self, _isolate: &Isolate) -> Result<()> {
        self.pre_ran.set(true);
        Ok(())
    }
    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.push_items("trail", [json!("early")]);
        Ok(config)
    }
}

#[derive(Default)]
struct LateSeat {
    pre_ran: Cell<bool>,
}
impl Component for LateSeat {
    fn name(&self) -> &'static str {
        "late"
    }
    fn runs_after(&self, isolate: &Isolate) -> Result<Vec<ComponentId>> {
        Ok(vec![isolate.id_of::<Enabler>()?])
    }
    fn pre_configure(&self, _isolate: &Isolate) -> Result<()> {
        self.pre_ran.set(true);
        Ok(())
    }
    fn configure(&self, _isolate: &Isolate, mut config: ConfigArtifact) -> Result<ConfigArtifact> {
        config.push_items("trail", [json!("late")]);
        Ok(config)
    }
}

#[test]
fn enabling_mid_pass_is_tolerated_in_both_directions() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], false);
    isolate.register(|_| Ok(Enabler)).unwrap();
    let early = isolate.register(|_| Ok(EarlySeat::default())).unwrap();
    let late = isolate.register(|_| Ok(LateSeat::default())).unwrap();
    isolate.enable::<Enabler>().unwrap();

    let config = ready_artifact(run_pipeline(&isolate, ConfigArtifact::new()).unwrap());

    // late was enabled before its own phase-1 turn and ran it; early's
    // turn had already passed, so only its later phases ran.
    assert!(late.pre_ran.get());
    assert!(!early.pre_ran.get());
    assert_eq!(config.get("trail"), Some(&json!(["early", "enabler", "late"])));
}

#[test]
fn missing_manager_is_fatal_before_any_phase() {
    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    isolate.register(|_| Ok(First)).unwrap();
    isolate.enable::<First>().unwrap();

    let err = run_pipeline(&isolate, ConfigArtifact::new()).unwrap_err();
    assert!(matches!(err, Error::NoPackageManager), "got: {err:?}");
}

#[test]
fn hook_errors_abort_the_run() {
    struct Faulty;
    impl Component for Faulty {
        fn name(&self) -> &'static str {
            "faulty"
        }
        fn configure(&self, _isolate: &Isolate, _config: ConfigArtifact) -> Result<ConfigArtifact> {
            Err(Error::Validation {
                component: "faulty",
                message: "broken on purpose".to_string(),
            })
        }
    }

    let temp = TempDir::new().unwrap();
    let isolate = isolate_in(&temp);
    scripted(&isolate, &[], false);
    isolate.register(|_| Ok(First)).unwrap();
    isolate.register(|_| Ok(Faulty)).unwrap();
    isolate.register(|_| Ok(Second)).unwrap();
    isolate.enable::<Faulty>().unwrap();
    isolate.enable::<Second>().unwrap();

    let err = run_pipeline(&isolate, ConfigArtifact::new()).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got: {err:?}");
}
