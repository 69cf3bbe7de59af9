//! The per-run owner of component and package-manager instances.

use std::any::{Any, TypeId, type_name};
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;

use lint_pm::PackageManager;
use lint_project::Project;

use crate::component::{Component, ComponentHandle, ComponentId};
use crate::error::{Error, Result};
use crate::graph::DependencySorter;

struct ComponentEntry {
    id: ComponentId,
    name: &'static str,
    as_any: Rc<dyn Any>,
    as_component: Rc<dyn Component>,
}

struct ManagerEntry {
    name: &'static str,
    as_any: Rc<dyn Any>,
    as_manager: Rc<dyn PackageManager>,
}

/// Owns every component and package-manager instance for one configuration
/// run and mediates all cross-component lookup.
///
/// Instances are keyed by their concrete type, so registering the same kind
/// twice yields the already-constructed instance, and two kinds sharing a
/// display name stay distinct. The isolate is deliberately single-threaded
/// shared state (`Rc` + `RefCell`): one pipeline run per isolate, no
/// locking provided or required.
pub struct Isolate {
    base_dir: PathBuf,
    components: RefCell<Vec<ComponentEntry>>,
    component_index: RefCell<HashMap<TypeId, usize>>,
    enabled: RefCell<HashSet<ComponentId>>,
    /// Set while any factory runs; lookups inside that window are
    /// setup-order defects.
    registering: Cell<bool>,
    managers: RefCell<Vec<ManagerEntry>>,
    manager_index: RefCell<HashMap<TypeId, usize>>,
    default_manager: Cell<Option<usize>>,
    project: OnceCell<Project>,
    selected_manager: OnceCell<Rc<dyn PackageManager>>,
}

impl Isolate {
    /// Create an isolate whose project discovery starts at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            components: RefCell::new(Vec::new()),
            component_index: RefCell::new(HashMap::new()),
            enabled: RefCell::new(HashSet::new()),
            registering: Cell::new(false),
            managers: RefCell::new(Vec::new()),
            manager_index: RefCell::new(HashMap::new()),
            default_manager: Cell::new(None),
            project: OnceCell::new(),
            selected_manager: OnceCell::new(),
        }
    }

    fn guard_lookup(&self, name: &'static str) -> Result<()> {
        if self.registering.get() {
            return Err(Error::SetupOrder {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Invoke `factory` exactly once and take ownership of the resulting
    /// component. Registering an already-registered kind returns the
    /// existing instance without re-invoking the factory.
    ///
    /// While the factory runs, every lookup through this isolate fails with
    /// [`Error::SetupOrder`]: ordering and dependency declarations must be
    /// resolved lazily through accessors, not during construction.
    pub fn register<C, F>(&self, factory: F) -> Result<Rc<C>>
    where
        C: Component,
        F: FnOnce(&Isolate) -> Result<C>,
    {
        let type_id = TypeId::of::<C>();
        let existing = self.component_index.borrow().get(&type_id).copied();
        if let Some(ix) = existing {
            let rc = self.components.borrow()[ix].as_any.clone();
            return Ok(downcast_entry(rc));
        }
        if self.registering.get() {
            // Registration from inside another factory leaves half-built
            // state observable; treated the same as a lookup.
            return Err(Error::SetupOrder {
                name: type_name::<C>().to_string(),
            });
        }

        self.registering.set(true);
        let built = factory(self);
        self.registering.set(false);
        let component = built?;

        let rc = Rc::new(component);
        let mut components = self.components.borrow_mut();
        let ix = components.len();
        let id = ComponentId(ix as u32);
        components.push(ComponentEntry {
            id,
            name: rc.name(),
            as_any: rc.clone() as Rc<dyn Any>,
            as_component: rc.clone() as Rc<dyn Component>,
        });
        drop(components);
        self.component_index.borrow_mut().insert(type_id, ix);
        tracing::debug!(component = rc.name(), id = ix, "component registered");
        Ok(rc)
    }

    /// Look up a registered component by kind.
    pub fn component<C: Component>(&self) -> Result<Rc<C>> {
        self.guard_lookup(type_name::<C>())?;
        let ix = self
            .component_index
            .borrow()
            .get(&TypeId::of::<C>())
            .copied()
            .ok_or_else(|| Error::UnregisteredComponent {
                name: type_name::<C>().to_string(),
            })?;
        let rc = self.components.borrow()[ix].as_any.clone();
        Ok(downcast_entry(rc))
    }

    /// The handle issued to a component kind at registration.
    pub fn id_of<C: Component>(&self) -> Result<ComponentId> {
        self.guard_lookup(type_name::<C>())?;
        let ix = self
            .component_index
            .borrow()
            .get(&TypeId::of::<C>())
            .copied()
            .ok_or_else(|| Error::UnregisteredComponent {
                name: type_name::<C>().to_string(),
            })?;
        Ok(self.components.borrow()[ix].id)
    }

    /// Flip a component's enabled flag. Valid for every registered kind;
    /// kinds with settings wrap this in their own `enable` methods, which
    /// validate and merge settings first.
    pub fn enable<C: Component>(&self) -> Result<()> {
        let id = self.id_of::<C>()?;
        self.enable_id(id);
        Ok(())
    }

    /// Flip the enabled flag for an already-resolved handle.
    pub fn enable_id(&self, id: ComponentId) {
        if self.enabled.borrow_mut().insert(id) {
            tracing::debug!(component = self.component_name(id), "component enabled");
        }
    }

    /// Whether the component behind `id` is enabled.
    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.enabled.borrow().contains(&id)
    }

    /// Whether a component kind is enabled.
    pub fn component_enabled<C: Component>(&self) -> Result<bool> {
        Ok(self.is_enabled(self.id_of::<C>()?))
    }

    /// Display name for a handle; empty if the handle is unknown.
    pub fn component_name(&self, id: ComponentId) -> &'static str {
        self.components
            .borrow()
            .get(id.0 as usize)
            .map(|entry| entry.name)
            .unwrap_or("")
    }

    /// Every registered component in dependency order.
    ///
    /// Recomputed on every call: components may be enabled between
    /// registration and the pipeline run, and the ordering accessors are
    /// resolved lazily right here.
    pub fn sorted_components(&self) -> Result<Vec<ComponentHandle>> {
        let handles: Vec<ComponentHandle> = self
            .components
            .borrow()
            .iter()
            .map(|entry| ComponentHandle {
                id: entry.id,
                component: entry.as_component.clone(),
            })
            .collect();

        let mut sorter = DependencySorter::new();
        for handle in &handles {
            sorter.add(handle.id);
        }
        for handle in &handles {
            // "Runs before X" means X runs after this component, and the
            // other way around; both normalize to the same edge form.
            sorter.add_after(handle.id, handle.component.runs_before(self)?);
            sorter.add_before(handle.id, handle.component.runs_after(self)?);
        }

        let order = sorter.sorted().map_err(|cycle| Error::CyclicDependency {
            participants: cycle
                .remaining
                .iter()
                .map(|id| self.component_name(*id).to_string())
                .collect(),
        })?;

        let by_id: HashMap<ComponentId, ComponentHandle> =
            handles.into_iter().map(|h| (h.id, h)).collect();
        Ok(order
            .into_iter()
            .filter_map(|id| by_id.get(&id).cloned())
            .collect())
    }

    /// Register a package manager. `default` designates the fallback used
    /// when detection matches nothing. Same single-invocation and guard
    /// semantics as [`register`](Isolate::register).
    pub fn register_package_manager<M, F>(&self, factory: F, default: bool) -> Result<Rc<M>>
    where
        M: PackageManager,
        F: FnOnce(&Isolate) -> Result<M>,
    {
        let type_id = TypeId::of::<M>();
        let existing = self.manager_index.borrow().get(&type_id).copied();
        if let Some(ix) = existing {
            let rc = self.managers.borrow()[ix].as_any.clone();
            return Ok(downcast_entry(rc));
        }
        if self.registering.get() {
            return Err(Error::SetupOrder {
                name: type_name::<M>().to_string(),
            });
        }

        self.registering.set(true);
        let built = factory(self);
        self.registering.set(false);
        let manager = built?;

        let rc = Rc::new(manager);
        let mut managers = self.managers.borrow_mut();
        let ix = managers.len();
        managers.push(ManagerEntry {
            name: rc.name(),
            as_any: rc.clone() as Rc<dyn Any>,
            as_manager: rc.clone() as Rc<dyn PackageManager>,
        });
        drop(managers);
        self.manager_index.borrow_mut().insert(type_id, ix);
        if default {
            self.default_manager.set(Some(ix));
        }
        tracing::debug!(manager = rc.name(), default, "package manager registered");
        Ok(rc)
    }

    /// Look up a registered package manager by kind.
    pub fn package_manager<M: PackageManager>(&self) -> Result<Rc<M>> {
        self.guard_lookup(type_name::<M>())?;
        let ix = self
            .manager_index
            .borrow()
            .get(&TypeId::of::<M>())
            .copied()
            .ok_or_else(|| Error::UnregisteredPackageManager {
                name: type_name::<M>().to_string(),
            })?;
        let rc = self.managers.borrow()[ix].as_any.clone();
        Ok(downcast_entry(rc))
    }

    /// The project governing this isolate's base directory. Discovered on
    /// first use and memoized for the isolate's lifetime.
    pub fn project(&self) -> Result<&Project> {
        if let Some(project) = self.project.get() {
            return Ok(project);
        }
        let project = Project::discover(&self.base_dir)?;
        Ok(self.project.get_or_init(|| project))
    }

    /// Select the active package manager, memoized: the first registered
    /// manager whose detection matches, else the designated default, else
    /// [`Error::NoPackageManager`].
    pub fn find_package_manager(&self) -> Result<Rc<dyn PackageManager>> {
        if let Some(manager) = self.selected_manager.get() {
            return Ok(manager.clone());
        }
        let project = self.project()?;

        let managers = self.managers.borrow();
        let mut selected: Option<Rc<dyn PackageManager>> = None;
        for entry in managers.iter() {
            if entry.as_manager.detect(project) {
                tracing::debug!(manager = entry.name, "package manager detected");
                selected = Some(entry.as_manager.clone());
                break;
            }
        }
        if selected.is_none() {
            if let Some(ix) = self.default_manager.get() {
                tracing::debug!(
                    manager = managers[ix].name,
                    "no package manager detected; falling back to default"
                );
                selected = Some(managers[ix].as_manager.clone());
            }
        }
        drop(managers);

        let manager = selected.ok_or(Error::NoPackageManager)?;
        Ok(self.selected_manager.get_or_init(|| manager).clone())
    }
}

fn downcast_entry<T: Any>(rc: Rc<dyn Any>) -> Rc<T> {
    rc.downcast::<T>()
        .expect("registry entries are keyed by their own TypeId")
}
