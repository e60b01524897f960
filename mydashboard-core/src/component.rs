//! Dashboard component capability.
//!
//! A component is anything that can report a stable id and an intrinsic
//! priority, and render itself for a user. Ordering is never derived from the
//! component itself; callers sort explicitly on `priority` then `id`.

use std::fmt;
use std::sync::Arc;

use crate::types::{ComponentId, ComponentSpec, UserName};

/// A pluggable dashboard widget.
pub trait DashboardComponent: fmt::Debug + Send + Sync {
    /// Stable identifier, unique within a registry.
    fn id(&self) -> &ComponentId;

    /// Intrinsic display priority. Lower values display first.
    fn priority(&self) -> i32;

    /// Human-readable heading. Defaults to the id.
    fn title(&self) -> &str {
        self.id().as_str()
    }

    /// Render the component for `user`. Opaque to the dashboard service.
    fn render(&self, user: &UserName) -> String;
}

/// Shared handle to a registered component.
pub type ComponentRef = Arc<dyn DashboardComponent>;

/// Placeholder substituted with the user name in [`StaticComponent`] bodies.
pub const USER_PLACEHOLDER: &str = "{user}";

/// Component declared in the YAML manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticComponent {
    id: ComponentId,
    priority: i32,
    title: String,
    body: String,
}

impl StaticComponent {
    pub fn new(id: impl Into<ComponentId>, priority: i32) -> Self {
        let id = id.into();
        Self {
            title: id.0.clone(),
            id,
            priority,
            body: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl From<ComponentSpec> for StaticComponent {
    fn from(spec: ComponentSpec) -> Self {
        let mut component = StaticComponent::new(spec.id, spec.priority);
        if let Some(title) = spec.title {
            component.title = title;
        }
        if let Some(body) = spec.body {
            component.body = body;
        }
        component
    }
}

impl DashboardComponent for StaticComponent {
    fn id(&self) -> &ComponentId {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, user: &UserName) -> String {
        let body = self.body.replace(USER_PLACEHOLDER, user.as_str());
        if body.is_empty() {
            format!("## {}\n", self.title)
        } else {
            format!("## {}\n\n{}\n", self.title, body)
        }
    }
}
