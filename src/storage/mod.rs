//! Store trait definitions for data access abstraction.
//!
//! The auth orchestrator depends on these contracts only; the `PostgreSQL`
//! implementation lives in [`postgres`]. All operations are async so request
//! cancellation propagates through in-flight lookups.

pub mod postgres;

pub use postgres::PgStore;

use std::future::Future;
use thiserror::Error;

use crate::domain::{Application, User};

/// Sentinel store failures. Anything that is not a sentinel is a backend
/// error and is translated to `internal` at the orchestrator boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    Duplicate,
    #[error("storage backend error")]
    Backend(#[source] anyhow::Error),
}

/// Fields required to persist a new identity. The biometric samples supplied
/// here become the immutable reference for all future logins.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub pass_hash: &'a str,
    pub press_times: &'a [f32],
    pub press_intervals: &'a [f32],
}

pub trait UserStore: Send + Sync {
    /// Look up an identity by its case-sensitive email.
    fn find_by_email(&self, email: &str) -> impl Future<Output = Result<User, StoreError>> + Send;

    /// Persist a new identity; email uniqueness is enforced by the store.
    fn create(&self, user: NewUser<'_>) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Fetch the administrator flag. A missing identity is `NotFound`, never
    /// `false`.
    fn is_admin(&self, user_id: i64) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

pub trait AppStore: Send + Sync {
    fn find_app(&self, app_id: i64)
    -> impl Future<Output = Result<Application, StoreError>> + Send;
}
