//! The generic persistence contract.

use crate::error::Result;
use crate::model::Id;

/// Basic CRUD operations over one entity type.
///
/// Implementations issue one parameterized statement per call against a
/// connection owned by the caller.
pub trait CrudPersister<T> {
    /// Insert the value fields of `entity` and return a copy carrying the
    /// identity generated by the database. `entity` itself is left untouched
    /// and any identity it already holds is ignored.
    fn create(&self, entity: &T) -> Result<T>;

    /// Fetch the record with identity `id`, or `None` when no such row exists.
    fn read(&self, id: Id) -> Result<Option<T>>;

    /// Overwrite the stored value fields of the row identified by `entity`.
    ///
    /// Fails with [`PersistenceErrorKind::NotFound`](crate::PersistenceErrorKind::NotFound)
    /// when no row has that identity.
    fn update(&self, entity: &T) -> Result<()>;

    /// Remove the row with identity `id`. Absent rows are not an error.
    fn delete(&self, id: Id) -> Result<()>;
}
