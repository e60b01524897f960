//! Behavioural tests for dashboard resolution: defaults, hidden components,
//! unregistered and unconfigured components, session caching.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mydashboard_core::{
    ComponentRef, ConfigStore, DashboardComponent, DashboardConfig, FileConfigStore,
    MemoryConfigStore, StaticComponent, StaticRegistry, StoreError, UserName,
};
use mydashboard_service::{DashboardService, MemorySession, NoSession, SessionCache};
use rstest::rstest;
use tempfile::TempDir;

/// Store wrapper counting `find_by_user` calls.
#[derive(Default)]
struct CountingStore {
    inner: MemoryConfigStore,
    finds: AtomicUsize,
}

impl CountingStore {
    fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

impl ConfigStore for CountingStore {
    fn find_by_user(&self, user: &UserName) -> Result<Vec<DashboardConfig>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_user(user)
    }

    fn insert(&self, config: &DashboardConfig) -> Result<(), StoreError> {
        self.inner.insert(config)
    }

    fn remove_by_user(&self, user: &UserName) -> Result<(), StoreError> {
        self.inner.remove_by_user(user)
    }
}

fn registry(specs: &[(&str, i32)]) -> StaticRegistry {
    StaticRegistry::new(
        specs
            .iter()
            .map(|(id, priority)| Arc::new(StaticComponent::new(*id, *priority)) as ComponentRef)
            .collect(),
    )
    .expect("registry")
}

fn abc() -> StaticRegistry {
    registry(&[("A", 1), ("B", 2), ("C", 3)])
}

fn ids(components: &[ComponentRef]) -> Vec<String> {
    components.iter().map(|c| c.id().to_string()).collect()
}

fn seed(store: &impl ConfigStore, records: &[(&str, &str, i32, bool)]) {
    for (user, id, order, hidden) in records {
        store
            .insert(&DashboardConfig::new(*user, *id, *order).with_hidden(*hidden))
            .expect("seed");
    }
}

// ---------------------------------------------------------------------------
// 1. Worked examples
// ---------------------------------------------------------------------------

#[test]
fn no_stored_config_shows_everything_and_generates_default() {
    let service = DashboardService::new(abc(), CountingStore::default());
    let cache = MemorySession::new();
    let session = service.session(&cache);
    let user = UserName::from("u1");

    let components = session.get_components(&user).expect("components");
    assert_eq!(ids(&components), ["A", "B", "C"]);

    let configs = session.get_user_config(&user).expect("config");
    assert_eq!(
        configs.to_vec(),
        vec![
            DashboardConfig::new("u1", "A", 1),
            DashboardConfig::new("u1", "B", 2),
            DashboardConfig::new("u1", "C", 3),
        ]
    );
}

#[test]
fn hidden_excluded_and_unconfigured_appended() {
    let store = CountingStore::default();
    seed(&store, &[("u2", "B", 1, false), ("u2", "A", 2, true)]);
    let service = DashboardService::new(abc(), store);
    let cache = MemorySession::new();

    let components = service
        .session(&cache)
        .get_components(&UserName::from("u2"))
        .expect("components");
    assert_eq!(ids(&components), ["B", "C"]);
}

#[test]
fn delete_then_read_regenerates_default_within_same_scope() {
    let store = CountingStore::default();
    seed(&store, &[("u1", "C", 1, false), ("u1", "A", 2, true)]);
    let service = DashboardService::new(abc(), store);
    let cache = MemorySession::new();
    let session = service.session(&cache);
    let user = UserName::from("u1");

    let before = session.get_user_config(&user).expect("config");
    assert_eq!(before.len(), 2);

    session.delete_user_config(&user).expect("delete");
    assert!(cache.configs().is_none());

    let after = session.get_user_config(&user).expect("config");
    let orders: Vec<_> = after
        .iter()
        .map(|c| (c.component_id.to_string(), c.order, c.hidden))
        .collect();
    assert_eq!(
        orders,
        [
            ("A".to_string(), 1, false),
            ("B".to_string(), 2, false),
            ("C".to_string(), 3, false),
        ]
    );
    assert_eq!(ids(&session.get_components(&user).expect("components")), ["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// 2. Properties over several configurations
// ---------------------------------------------------------------------------

#[rstest]
#[case::single_hidden(&[("A", 1, true)], &["B", "C"])]
#[case::all_hidden(&[("A", 1, true), ("B", 2, true), ("C", 3, true)], &[])]
#[case::reordered(&[("C", 1, false), ("B", 2, false), ("A", 3, false)], &["C", "B", "A"])]
#[case::unregistered_dropped(&[("Z", 1, false), ("B", 2, false)], &["B", "A", "C"])]
#[case::unsorted_orders(&[("A", 30, false), ("C", 10, false), ("B", 20, true)], &["C", "A"])]
#[case::duplicate_record(&[("B", 1, false), ("B", 2, false)], &["B", "A", "C"])]
fn reconciled_components(#[case] records: &[(&str, i32, bool)], #[case] expected: &[&str]) {
    let store = CountingStore::default();
    for (id, order, hidden) in records {
        store
            .insert(&DashboardConfig::new("u", *id, *order).with_hidden(*hidden))
            .expect("seed");
    }
    let service = DashboardService::new(abc(), store);

    let components = service
        .session(&NoSession)
        .get_components(&UserName::from("u"))
        .expect("components");
    assert_eq!(ids(&components), expected);

    for (id, _, hidden) in records {
        if *hidden {
            assert!(!ids(&components).contains(&id.to_string()), "{id} is hidden");
        }
    }
}

#[test]
fn newly_installed_components_go_last_by_priority() {
    let store = CountingStore::default();
    seed(&store, &[("u", "C", 1, false), ("u", "A", 2, false)]);
    let service = DashboardService::new(
        registry(&[("A", 5), ("C", 6), ("late", 9), ("early", -1)]),
        store,
    );

    let components = service
        .session(&NoSession)
        .get_components(&UserName::from("u"))
        .expect("components");
    assert_eq!(ids(&components), ["C", "A", "early", "late"]);
}

// ---------------------------------------------------------------------------
// 3. Session caching
// ---------------------------------------------------------------------------

#[test]
fn second_read_in_scope_hits_cache_and_shares_allocation() {
    let service = DashboardService::new(abc(), CountingStore::default());
    let cache = MemorySession::new();
    let session = service.session(&cache);
    let user = UserName::from("u1");

    let first = session.get_components(&user).expect("first");
    let second = session.get_components(&user).expect("second");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(service.store().finds(), 1);
}

#[test]
fn separate_scopes_do_not_share_results() {
    let service = DashboardService::new(abc(), CountingStore::default());
    let user = UserName::from("u1");

    service
        .session(&MemorySession::new())
        .get_components(&user)
        .expect("first scope");
    service
        .session(&MemorySession::new())
        .get_components(&user)
        .expect("second scope");
    assert_eq!(service.store().finds(), 2);
}

#[test]
fn save_overwrites_cached_config_without_store_read() {
    let service = DashboardService::new(abc(), CountingStore::default());
    let cache = MemorySession::new();
    let session = service.session(&cache);
    let user = UserName::from("u1");

    let saved = vec![
        DashboardConfig::new("u1", "B", 1),
        DashboardConfig::new("u1", "C", 2).with_hidden(true),
    ];
    session.save_config_list(saved.clone()).expect("save");

    let configs = session.get_user_config(&user).expect("config");
    assert_eq!(configs.to_vec(), saved);
    assert_eq!(service.store().finds(), 0);
    assert_eq!(ids(&session.get_components(&user).expect("components")), ["B", "A"]);
}

// ---------------------------------------------------------------------------
// 4. File-backed store
// ---------------------------------------------------------------------------

#[test]
fn file_store_persists_across_service_instances() {
    let home = TempDir::new().expect("home");
    let user = UserName::from("alice");

    {
        let service = DashboardService::new(abc(), FileConfigStore::at(home.path()));
        service
            .session(&NoSession)
            .replace_user_config(
                &user,
                vec![
                    DashboardConfig::new("alice", "C", 1),
                    DashboardConfig::new("alice", "B", 2).with_hidden(true),
                ],
            )
            .expect("replace");
    }

    let service = DashboardService::new(abc(), FileConfigStore::at(home.path()));
    let components = service
        .session(&MemorySession::new())
        .get_components(&user)
        .expect("components");
    assert_eq!(ids(&components), ["C", "A"]);
}

#[test]
fn store_errors_propagate() {
    let home = TempDir::new().expect("home");
    let service = DashboardService::new(abc(), FileConfigStore::at(home.path()));
    let err = service
        .session(&NoSession)
        .get_user_config(&UserName::from("../escape"))
        .unwrap_err();
    assert!(err.to_string().contains("invalid user name"), "got: {err}");
}
