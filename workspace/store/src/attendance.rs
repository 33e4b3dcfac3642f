use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use model::entities::{attendance_log, course, student, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Result, StoreError};
use crate::repository::{Repository, ensure_exists, ensure_optional_exists};

/// Fields for a new attendance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub student_id: i32,
    pub date: NaiveDate,
    pub present: bool,
    pub course_id: Option<i32>,
    pub marked_by_id: Option<i32>,
    pub submitted_by_id: Option<i32>,
}

impl NewAttendance {
    pub fn new(student_id: i32, date: NaiveDate, present: bool) -> Self {
        Self {
            student_id,
            date,
            present,
            course_id: None,
            marked_by_id: None,
            submitted_by_id: None,
        }
    }
}

/// Only the presence flag of a record can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceChanges {
    pub present: bool,
}

/// Attendance logs backed by the `attendance_logs` table.
///
/// Updates are last-writer-wins: there is no version column, so two
/// concurrent updates of the same record both succeed and the later commit
/// is what a subsequent read returns.
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository for AttendanceStore {
    type Record = attendance_log::Model;
    type New = NewAttendance;
    type Changes = AttendanceChanges;

    #[instrument(skip(self))]
    async fn create(&self, new: NewAttendance) -> Result<attendance_log::Model> {
        trace!("Validating references for new attendance record");
        ensure_exists::<student::Entity>(&self.db, new.student_id, "student").await?;
        ensure_optional_exists::<course::Entity>(&self.db, new.course_id, "course").await?;
        ensure_optional_exists::<user::Entity>(&self.db, new.marked_by_id, "user").await?;
        ensure_optional_exists::<user::Entity>(&self.db, new.submitted_by_id, "user").await?;

        let record = attendance_log::ActiveModel {
            date: Set(new.date),
            student_id: Set(new.student_id),
            course_id: Set(new.course_id),
            present: Set(new.present),
            updated_at: Set(Utc::now().naive_utc()),
            marked_by_id: Set(new.marked_by_id),
            submitted_by_id: Set(new.submitted_by_id),
            ..Default::default()
        };

        let inserted = record.insert(&self.db).await?;
        info!(
            "Attendance record {} created for student_id={} on date={} (present={})",
            inserted.id, inserted.student_id, inserted.date, inserted.present
        );
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<attendance_log::Model> {
        match attendance_log::Entity::find_by_id(id).one(&self.db).await? {
            Some(record) => {
                debug!("Found attendance record {}", id);
                Ok(record)
            }
            None => {
                warn!("Attendance record {} not found", id);
                Err(StoreError::not_found("attendance record", id))
            }
        }
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i32, changes: AttendanceChanges) -> Result<attendance_log::Model> {
        let existing = self.get_by_id(id).await?;
        debug!(
            "Updating attendance record {}: present {} -> {}",
            id, existing.present, changes.present
        );

        let mut active: attendance_log::ActiveModel = existing.into();
        active.present = Set(changes.present);
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&self.db).await?;
        info!("Attendance record {} updated", id);
        Ok(updated)
    }
}
