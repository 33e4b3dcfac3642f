use async_trait::async_trait;
use chrono::Utc;
use model::entities::{department, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::repository::{Repository, ensure_optional_exists};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    pub name: String,
    pub submitted_by_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentChanges {
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for DepartmentStore {
    type Record = department::Model;
    type New = NewDepartment;
    type Changes = DepartmentChanges;

    #[instrument(skip(self))]
    async fn create(&self, new: NewDepartment) -> Result<department::Model> {
        ensure_optional_exists::<user::Entity>(&self.db, new.submitted_by_id, "user").await?;

        let inserted = department::ActiveModel {
            name: Set(new.name),
            updated_at: Set(Utc::now().naive_utc()),
            submitted_by_id: Set(new.submitted_by_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Department {} created: {}", inserted.id, inserted.name);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<department::Model> {
        department::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                warn!("Department {} not found", id);
                StoreError::not_found("department", id)
            })
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i32, changes: DepartmentChanges) -> Result<department::Model> {
        let existing = self.get_by_id(id).await?;

        let mut active: department::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&self.db).await?;
        info!("Department {} updated", id);
        Ok(updated)
    }
}
