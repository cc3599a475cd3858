use std::future::Future;

use crate::{
    error::Result,
    movie::{CreateMovie, Movie},
};

/// Narrow interface to the persistent movie records.
///
/// Every method fails with [`crate::Error::DatabaseError`] when the backing store is not
/// available. `replace` and `remove` fail with [`crate::Error::RecordNotFound`] when no
/// record was affected.
pub trait MovieStore: Clone + Send + Sync + 'static {
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Movie>>> + Send;

    /// All records in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Movie>>> + Send;

    /// Persists a new record, the store assigns its id.
    fn insert(&self, movie: CreateMovie) -> impl Future<Output = Result<Movie>> + Send;

    /// Overwrites all mutable fields of an existing record.
    fn replace(&self, id: i64, movie: CreateMovie) -> impl Future<Output = Result<()>> + Send;

    fn remove(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64>> + Send;
}
