//! Request/session-scoped cache of resolved dashboard lists.
//!
//! The cache holds at most one configuration list and one component list.
//! There is no eviction: a slot is either filled or empty.

use std::sync::{Arc, PoisonError, RwLock};

use mydashboard_core::{ComponentRef, DashboardConfig};

/// Shared, immutable configuration list.
pub type ConfigList = Arc<[DashboardConfig]>;

/// Shared, immutable list of displayable components.
pub type ComponentList = Arc<[ComponentRef]>;

/// Scoped key-value storage for the dashboard service.
pub trait SessionCache: Send + Sync {
    fn configs(&self) -> Option<ConfigList>;

    /// Replace the cached configuration list; `None` clears it.
    fn set_configs(&self, configs: Option<ConfigList>);

    fn components(&self) -> Option<ComponentList>;

    /// Replace the cached component list; `None` clears it.
    fn set_components(&self, components: Option<ComponentList>);

    /// Clear both slots.
    fn clear(&self) {
        self.set_configs(None);
        self.set_components(None);
    }
}

#[derive(Debug, Default)]
struct Slots {
    configs: Option<ConfigList>,
    components: Option<ComponentList>,
}

/// In-memory session bound to one user's session or request.
///
/// Concurrent requests sharing a session may race to fill a slot; the loser
/// simply overwrites an equivalent value.
#[derive(Debug, Default)]
pub struct MemorySession {
    slots: RwLock<Slots>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for MemorySession {
    fn configs(&self) -> Option<ConfigList> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.configs.clone()
    }

    fn set_configs(&self, configs: Option<ConfigList>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.configs = configs;
    }

    fn components(&self) -> Option<ComponentList> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.components.clone()
    }

    fn set_components(&self, components: Option<ComponentList>) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.components = components;
    }
}

/// Cache for callers outside any request: every read misses, writes are
/// dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

impl SessionCache for NoSession {
    fn configs(&self) -> Option<ConfigList> {
        None
    }

    fn set_configs(&self, _configs: Option<ConfigList>) {}

    fn components(&self) -> Option<ComponentList> {
        None
    }

    fn set_components(&self, _components: Option<ComponentList>) {}
}
