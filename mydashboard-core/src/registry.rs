//! Component registry.
//!
//! The registry is assembled once at startup and is read-only afterwards.
//! [`StaticRegistry`] holds components in registration order; sorting for
//! display is the dashboard service's job.
//!
//! The CLI builds its registry from the YAML manifest at
//! `~/.mydashboard/components.yaml` (see [`load_registry_at`]). Manifest
//! editing functions follow the same `_at(home, …)` / convenience-wrapper
//! pattern as the configuration store.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::component::{ComponentRef, DashboardComponent, StaticComponent};
use crate::error::{io_err, StoreError};
use crate::paths::{self, home};
use crate::types::{ComponentId, ComponentManifest, ComponentSpec};

// ---------------------------------------------------------------------------
// 1. Registry abstraction
// ---------------------------------------------------------------------------

/// Source of every currently available dashboard component.
pub trait ComponentRegistry: Send + Sync {
    /// All registered components, in registration order.
    fn components(&self) -> Vec<ComponentRef>;
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistry for Arc<R> {
    fn components(&self) -> Vec<ComponentRef> {
        (**self).components()
    }
}

/// Immutable in-process registry.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    components: Vec<ComponentRef>,
}

impl StaticRegistry {
    /// Build a registry, rejecting duplicate component ids.
    pub fn new(components: Vec<ComponentRef>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.id().clone()) {
                return Err(StoreError::DuplicateComponent(component.id().0.clone()));
            }
        }
        Ok(Self { components })
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &ComponentId) -> Option<&ComponentRef> {
        self.components.iter().find(|c| c.id() == id)
    }
}

impl ComponentRegistry for StaticRegistry {
    fn components(&self) -> Vec<ComponentRef> {
        self.components.clone()
    }
}

impl TryFrom<ComponentManifest> for StaticRegistry {
    type Error = StoreError;

    fn try_from(manifest: ComponentManifest) -> Result<Self, Self::Error> {
        let components = manifest
            .components
            .into_iter()
            .map(|spec| Arc::new(StaticComponent::from(spec)) as ComponentRef)
            .collect();
        StaticRegistry::new(components)
    }
}

// ---------------------------------------------------------------------------
// 2. Manifest load / save
// ---------------------------------------------------------------------------

/// Load the component manifest. Returns an empty manifest if the file does
/// not exist yet.
pub fn load_manifest_at(home: &Path) -> Result<ComponentManifest, StoreError> {
    let path = paths::manifest_path_at(home);
    if !path.exists() {
        return Ok(ComponentManifest::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse { path, source: e })
}

/// Atomically save the component manifest.
pub fn save_manifest_at(home: &Path, manifest: &ComponentManifest) -> Result<(), StoreError> {
    let yaml = serde_yaml::to_string(manifest)?;
    paths::write_atomic(&paths::manifest_path_at(home), &yaml)
}

/// Build the registry from the manifest.
pub fn load_registry_at(home: &Path) -> Result<StaticRegistry, StoreError> {
    let registry = StaticRegistry::try_from(load_manifest_at(home)?)?;
    tracing::debug!(count = registry.len(), "loaded component registry");
    Ok(registry)
}

/// `load_registry_at` convenience wrapper.
pub fn load_registry() -> Result<StaticRegistry, StoreError> {
    load_registry_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Manifest editing
// ---------------------------------------------------------------------------

/// Register a component in the manifest.
///
/// Fails with [`StoreError::DuplicateComponent`] if the id is already taken.
pub fn add_component_at(home: &Path, spec: ComponentSpec) -> Result<ComponentManifest, StoreError> {
    let mut manifest = load_manifest_at(home)?;
    if manifest.components.iter().any(|c| c.id == spec.id) {
        return Err(StoreError::DuplicateComponent(spec.id.0));
    }
    manifest.components.push(spec);
    save_manifest_at(home, &manifest)?;
    Ok(manifest)
}

/// `add_component_at` convenience wrapper.
pub fn add_component(spec: ComponentSpec) -> Result<ComponentManifest, StoreError> {
    add_component_at(&home()?, spec)
}

/// Remove a component from the manifest.
///
/// Stored user configurations referencing it are left alone; the dashboard
/// service skips ids that are no longer registered.
pub fn remove_component_at(home: &Path, id: &ComponentId) -> Result<ComponentManifest, StoreError> {
    let mut manifest = load_manifest_at(home)?;
    let before = manifest.components.len();
    manifest.components.retain(|c| &c.id != id);
    if manifest.components.len() == before {
        return Err(StoreError::UnknownComponent(id.0.clone()));
    }
    save_manifest_at(home, &manifest)?;
    Ok(manifest)
}

/// `remove_component_at` convenience wrapper.
pub fn remove_component(id: &ComponentId) -> Result<ComponentManifest, StoreError> {
    remove_component_at(&home()?, id)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
