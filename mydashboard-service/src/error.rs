//! Error types for mydashboard-service.

use thiserror::Error;

use mydashboard_core::StoreError;

/// All errors that can arise from dashboard service operations.
///
/// Reconciliation itself never fails; only store access does.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An error from the configuration store.
    #[error("configuration store error: {0}")]
    Store(#[from] StoreError),
}
