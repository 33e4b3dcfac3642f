use async_trait::async_trait;
use chrono::Utc;
use model::entities::user;
use model::password::HashedPassword;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::repository::Repository;

/// Fields for a new account. The password must already be hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub kind: Option<String>,
    pub username: String,
    pub email: String,
    pub password: HashedPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub kind: Option<String>,
    pub email: Option<String>,
    pub password: Option<HashedPassword>,
}

#[derive(Debug, Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Looks an account up by its unique username.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        debug!("User '{}' present: {}", username, found.is_some());
        Ok(found)
    }
}

#[async_trait]
impl Repository for UserStore {
    type Record = user::Model;
    type New = NewUser;
    type Changes = UserChanges;

    #[instrument(skip(self, new), fields(username = %new.username))]
    async fn create(&self, new: NewUser) -> Result<user::Model> {
        let inserted = user::ActiveModel {
            kind: Set(new.kind),
            username: Set(new.username),
            email: Set(new.email),
            password: Set(new.password.into_inner()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("User {} created: {}", inserted.id, inserted.username);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                warn!("User {} not found", id);
                StoreError::not_found("user", id)
            })
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i32, changes: UserChanges) -> Result<user::Model> {
        let existing = self.get_by_id(id).await?;

        let mut active: user::ActiveModel = existing.into();
        if let Some(kind) = changes.kind {
            active.kind = Set(Some(kind));
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password) = changes.password {
            debug!("Replacing password hash for user {}", id);
            active.password = Set(password.into_inner());
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&self.db).await?;
        info!("User {} updated", id);
        Ok(updated)
    }
}
