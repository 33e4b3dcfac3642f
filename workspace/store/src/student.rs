use async_trait::async_trait;
use chrono::Utc;
use model::entities::{department, student, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::repository::{Repository, ensure_optional_exists};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub full_name: String,
    pub department_id: Option<i32>,
    pub class_name: Option<String>,
    pub submitted_by_id: Option<i32>,
}

/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub full_name: Option<String>,
    pub department_id: Option<i32>,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for StudentStore {
    type Record = student::Model;
    type New = NewStudent;
    type Changes = StudentChanges;

    #[instrument(skip(self))]
    async fn create(&self, new: NewStudent) -> Result<student::Model> {
        ensure_optional_exists::<department::Entity>(&self.db, new.department_id, "department")
            .await?;
        ensure_optional_exists::<user::Entity>(&self.db, new.submitted_by_id, "user").await?;

        let inserted = student::ActiveModel {
            full_name: Set(new.full_name),
            department_id: Set(new.department_id),
            class_name: Set(new.class_name),
            updated_at: Set(Utc::now().naive_utc()),
            submitted_by_id: Set(new.submitted_by_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Student {} created: {}", inserted.id, inserted.full_name);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<student::Model> {
        student::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                warn!("Student {} not found", id);
                StoreError::not_found("student", id)
            })
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i32, changes: StudentChanges) -> Result<student::Model> {
        let existing = self.get_by_id(id).await?;
        ensure_optional_exists::<department::Entity>(&self.db, changes.department_id, "department")
            .await?;

        let mut active: student::ActiveModel = existing.into();
        if let Some(full_name) = changes.full_name {
            debug!("Updating full_name to: {}", full_name);
            active.full_name = Set(full_name);
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        if let Some(class_name) = changes.class_name {
            active.class_name = Set(Some(class_name));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&self.db).await?;
        info!("Student {} updated", id);
        Ok(updated)
    }
}
