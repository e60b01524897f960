//! MyDashboard core library — domain types, component registry, configuration
//! store, errors.
//!
//! - [`types`] — newtypes and configuration records
//! - [`component`] — the [`DashboardComponent`] capability and [`StaticComponent`]
//! - [`registry`] — [`ComponentRegistry`] plus the YAML component manifest
//! - [`store`] — [`ConfigStore`] plus file and in-memory stores
//! - [`paths`] — `~/.mydashboard/` layout
//! - [`error`] — [`StoreError`]

pub mod component;
pub mod error;
pub mod paths;
pub mod registry;
pub mod store;
pub mod types;

pub use component::{ComponentRef, DashboardComponent, StaticComponent};
pub use error::StoreError;
pub use registry::{ComponentRegistry, StaticRegistry};
pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore};
pub use types::{ComponentId, ComponentManifest, ComponentSpec, DashboardConfig, UserName};
