//! Reconciliation of registered components against a user's configuration.
//!
//! Ordering rules:
//! 1. Components are ordered by `priority` ascending, ties by `id`.
//! 2. Configuration records are ordered by `order` ascending, ties by
//!    `component_id`, then by insertion order (the sort is stable).
//! 3. A record consumes at most one component; a duplicated record finds
//!    nothing the second time.

use std::collections::HashMap;

use mydashboard_core::{ComponentId, ComponentRef, DashboardComponent, DashboardConfig, UserName};

/// Sort components for display when no configuration says otherwise.
pub fn sort_by_priority(components: &mut [ComponentRef]) {
    components.sort_by(|a, b| {
        a.priority()
            .cmp(&b.priority())
            .then_with(|| a.id().cmp(b.id()))
    });
}

/// Sort stored configuration records into display order.
pub fn sort_configs(configs: &mut [DashboardConfig]) {
    configs.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.component_id.cmp(&b.component_id))
    });
}

/// Default configuration for a user with nothing stored: every registered
/// component, in priority order, visible, numbered from 1.
pub fn default_config(user: &UserName, components: &[ComponentRef]) -> Vec<DashboardConfig> {
    let mut sorted = components.to_vec();
    sort_by_priority(&mut sorted);
    sorted
        .iter()
        .zip(1..)
        .map(|(component, order)| DashboardConfig::new(user.clone(), component.id().clone(), order))
        .collect()
}

/// Output of [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Components to display, in display order.
    pub components: Vec<ComponentRef>,
    /// Registered components the configuration never mentioned, in the order
    /// they were appended to `components`.
    pub unconfigured: Vec<ComponentId>,
}

/// Merge a sorted configuration with the registered components.
///
/// Hidden records remove their component from the pool without displaying
/// it. Records naming an unregistered component are skipped. Whatever is
/// left in the pool is appended in priority order.
pub fn reconcile(configs: &[DashboardConfig], registered: &[ComponentRef]) -> Reconciled {
    let mut pool: HashMap<&ComponentId, &ComponentRef> = HashMap::with_capacity(registered.len());
    for component in registered {
        pool.entry(component.id()).or_insert(component);
    }

    let mut components = Vec::with_capacity(registered.len());
    for config in configs {
        let Some(component) = pool.remove(&config.component_id) else {
            continue;
        };
        if !config.hidden {
            components.push(component.clone());
        }
    }

    let mut leftovers: Vec<ComponentRef> = registered
        .iter()
        .filter(|c| pool.remove(c.id()).is_some())
        .cloned()
        .collect();
    sort_by_priority(&mut leftovers);

    let unconfigured = leftovers.iter().map(|c| c.id().clone()).collect();
    components.extend(leftovers);
    Reconciled {
        components,
        unconfigured,
    }
}
