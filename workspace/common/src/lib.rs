//! Transport-layer types for the attendance API.
//! These structs are the JSON request/response payloads; the server uses them
//! directly and clients or tests can reuse them without duplicating shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ===================== Attendance =====================

/// Request body for recording attendance.
///
/// The observation date travels under the `updated_at` key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateAttendanceRequest {
    /// Student the observation is for
    #[validate(range(min = 1))]
    pub student_id: i32,
    /// Calendar date of the observation (YYYY-MM-DD)
    #[serde(rename = "updated_at")]
    #[schema(value_type = String, format = Date, example = "2024-09-02")]
    pub date: NaiveDate,
    /// Whether the student was present
    pub present: bool,
    /// Course the observation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub course_id: Option<i32>,
    /// User who took the attendance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub marked_by_id: Option<i32>,
    /// User who entered the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub submitted_by_id: Option<i32>,
}

impl CreateAttendanceRequest {
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

/// Request body for changing the presence flag of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateAttendanceRequest {
    pub present: bool,
}

/// An attendance record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AttendanceDto {
    pub id: i32,
    pub student_id: i32,
    /// Calendar date of the observation (YYYY-MM-DD)
    #[serde(rename = "updated_at")]
    #[schema(value_type = String, format = Date, example = "2024-09-02")]
    pub date: NaiveDate,
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i32>,
}

// ===================== Acknowledgements =====================

/// Body of every acknowledgement and error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement of a created record, carrying its id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i32,
}
