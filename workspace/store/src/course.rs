use async_trait::async_trait;
use chrono::Utc;
use model::entities::{course, department, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{info, instrument, warn};

use crate::error::{Result, StoreError};
use crate::repository::{Repository, ensure_optional_exists};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub semester: Option<i32>,
    pub class_name: Option<String>,
    pub lecture_hours: Option<i32>,
    pub department_id: Option<i32>,
    pub submitted_by_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub semester: Option<i32>,
    pub class_name: Option<String>,
    pub lecture_hours: Option<i32>,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for CourseStore {
    type Record = course::Model;
    type New = NewCourse;
    type Changes = CourseChanges;

    #[instrument(skip(self))]
    async fn create(&self, new: NewCourse) -> Result<course::Model> {
        ensure_optional_exists::<department::Entity>(&self.db, new.department_id, "department")
            .await?;
        ensure_optional_exists::<user::Entity>(&self.db, new.submitted_by_id, "user").await?;

        let inserted = course::ActiveModel {
            name: Set(new.name),
            semester: Set(new.semester),
            class_name: Set(new.class_name),
            lecture_hours: Set(new.lecture_hours),
            department_id: Set(new.department_id),
            updated_at: Set(Utc::now().naive_utc()),
            submitted_by_id: Set(new.submitted_by_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Course {} created: {}", inserted.id, inserted.name);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<course::Model> {
        course::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                warn!("Course {} not found", id);
                StoreError::not_found("course", id)
            })
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i32, changes: CourseChanges) -> Result<course::Model> {
        let existing = self.get_by_id(id).await?;
        ensure_optional_exists::<department::Entity>(&self.db, changes.department_id, "department")
            .await?;

        let mut active: course::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(semester) = changes.semester {
            active.semester = Set(Some(semester));
        }
        if let Some(class_name) = changes.class_name {
            active.class_name = Set(Some(class_name));
        }
        if let Some(lecture_hours) = changes.lecture_hours {
            active.lecture_hours = Set(Some(lecture_hours));
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&self.db).await?;
        info!("Course {} updated", id);
        Ok(updated)
    }
}
