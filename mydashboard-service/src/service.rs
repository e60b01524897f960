//! Dashboard service: per-user configuration resolution with a session cache.

use mydashboard_core::{ComponentRef, ComponentRegistry, ConfigStore, DashboardConfig, UserName};

use crate::cache::{ComponentList, ConfigList, SessionCache};
use crate::error::ServiceError;
use crate::reconcile::{default_config, reconcile, sort_by_priority, sort_configs};

/// Long-lived service owning the component registry and configuration store.
///
/// Construct once at the composition root and share by reference (or `Arc`).
#[derive(Debug)]
pub struct DashboardService<R, S> {
    registry: R,
    store: S,
}

impl<R: ComponentRegistry, S: ConfigStore> DashboardService<R, S> {
    pub fn new(registry: R, store: S) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every registered component, in priority order.
    pub fn list_components(&self) -> Vec<ComponentRef> {
        let mut components = self.registry.components();
        sort_by_priority(&mut components);
        components
    }

    /// Open a session bound to `cache`. Use [`NoSession`](crate::NoSession)
    /// outside of any request.
    pub fn session<'a, C: SessionCache + ?Sized>(
        &'a self,
        cache: &'a C,
    ) -> DashboardSession<'a, R, S, C> {
        DashboardSession {
            service: self,
            cache,
        }
    }
}

/// The dashboard service as seen from one request or session scope.
pub struct DashboardSession<'a, R, S, C: ?Sized> {
    service: &'a DashboardService<R, S>,
    cache: &'a C,
}

impl<R, S, C> DashboardSession<'_, R, S, C>
where
    R: ComponentRegistry,
    S: ConfigStore,
    C: SessionCache + ?Sized,
{
    /// Resolve the configuration list for `user`.
    ///
    /// A cached list is returned as-is. Otherwise the stored records are
    /// loaded and sorted by order; a user with no records gets a generated
    /// default (not persisted). The result is cached.
    pub fn get_user_config(&self, user: &UserName) -> Result<ConfigList, ServiceError> {
        if let Some(configs) = self.cache.configs() {
            tracing::debug!(user = %user, "dashboard configuration served from session");
            return Ok(configs);
        }

        let mut configs = self.service.store.find_by_user(user)?;
        if configs.is_empty() {
            configs = default_config(user, &self.service.registry.components());
            tracing::debug!(
                user = %user,
                count = configs.len(),
                "generated default dashboard configuration"
            );
        } else {
            sort_configs(&mut configs);
        }

        let configs: ConfigList = configs.into();
        self.cache.set_configs(Some(configs.clone()));
        Ok(configs)
    }

    /// Resolve the components `user` should see, in display order.
    ///
    /// Hidden components are excluded. Registered components missing from the
    /// configuration are appended in priority order and logged.
    pub fn get_components(&self, user: &UserName) -> Result<ComponentList, ServiceError> {
        if let Some(components) = self.cache.components() {
            tracing::debug!(user = %user, "dashboard components served from session");
            return Ok(components);
        }

        let configs = self.get_user_config(user)?;
        let reconciled = reconcile(&configs, &self.service.registry.components());
        if !reconciled.unconfigured.is_empty() {
            let ids: Vec<&str> = reconciled.unconfigured.iter().map(|id| id.as_str()).collect();
            tracing::warn!(
                user = %user,
                components = ?ids,
                "dashboard component(s) found without user configuration"
            );
        }

        let components: ComponentList = reconciled.components.into();
        self.cache.set_components(Some(components.clone()));
        Ok(components)
    }

    /// Insert every record into the store, then make `configs` the cached
    /// configuration. The cached component list is dropped so the next read
    /// reconciles against the new configuration.
    pub fn save_config_list(&self, configs: Vec<DashboardConfig>) -> Result<(), ServiceError> {
        for config in &configs {
            self.service.store.insert(config)?;
        }
        self.cache.set_configs(Some(configs.into()));
        self.cache.set_components(None);
        Ok(())
    }

    /// Remove every stored record for `user` and clear the session so the
    /// next read regenerates from the registry.
    pub fn delete_user_config(&self, user: &UserName) -> Result<(), ServiceError> {
        self.service.store.remove_by_user(user)?;
        self.cache.clear();
        Ok(())
    }

    /// Replace `user`'s stored configuration wholesale.
    pub fn replace_user_config(
        &self,
        user: &UserName,
        configs: Vec<DashboardConfig>,
    ) -> Result<(), ServiceError> {
        self.delete_user_config(user)?;
        self.save_config_list(configs)
    }
}
