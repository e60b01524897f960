//! # mydashboard-service
//!
//! Resolves which dashboard components a user sees, and in what order.
//!
//! Build one [`DashboardService`] at startup from a
//! [`ComponentRegistry`](mydashboard_core::ComponentRegistry) and a
//! [`ConfigStore`](mydashboard_core::ConfigStore), then open a
//! [`DashboardSession`] per request with that request's [`SessionCache`].

pub mod cache;
pub mod error;
pub mod reconcile;
pub mod service;

pub use cache::{ComponentList, ConfigList, MemorySession, NoSession, SessionCache};
pub use error::ServiceError;
pub use reconcile::{default_config, reconcile, sort_by_priority, sort_configs, Reconciled};
pub use service::{DashboardService, DashboardSession};
