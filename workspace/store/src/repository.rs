use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PrimaryKeyTrait};
use tracing::{trace, warn};

use crate::error::{Result, StoreError};

/// Data access for one entity.
///
/// Each entity gets the same three capabilities: insert a new row, fetch a
/// row by primary key, and apply a change set to an existing row. Lookups and
/// updates of a missing id return [`StoreError::NotFound`]; an update never
/// inserts.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The persisted row.
    type Record: Send;
    /// Everything needed to insert a row.
    type New: Send;
    /// The fields an update may change.
    type Changes: Send;

    async fn create(&self, new: Self::New) -> Result<Self::Record>;

    async fn get_by_id(&self, id: i32) -> Result<Self::Record>;

    async fn update(&self, id: i32, changes: Self::Changes) -> Result<Self::Record>;
}

/// Fails with [`StoreError::InvalidReference`] unless a row of `E` with `id`
/// exists.
pub(crate) async fn ensure_exists<E>(db: &DatabaseConnection, id: i32, what: &str) -> Result<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    trace!("Checking that {} {} exists", what, id);
    match E::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => {
            warn!("Reference to missing {} {}", what, id);
            Err(StoreError::InvalidReference(format!(
                "{} with id {} does not exist",
                what, id
            )))
        }
    }
}

/// Same as [`ensure_exists`] for nullable foreign keys.
pub(crate) async fn ensure_optional_exists<E>(
    db: &DatabaseConnection,
    id: Option<i32>,
    what: &str,
) -> Result<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    match id {
        Some(id) => ensure_exists::<E>(db, id, what).await,
        None => Ok(()),
    }
}
