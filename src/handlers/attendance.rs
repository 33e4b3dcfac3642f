use crate::error::ApiError;
use crate::schemas::AppState;
use axum::{
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::Json,
};
use common::{
    AttendanceDto, CreateAttendanceRequest, CreatedResponse, MessageResponse,
    UpdateAttendanceRequest,
};
use model::entities::attendance_log;
use store::{AttendanceChanges, NewAttendance, StoreError};
use tracing::{debug, error, info, instrument, trace, warn};
use validator::Validate;

const NOT_FOUND_MESSAGE: &str = "Attendance record not found";

/// The three attendance operations, used to word failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Retrieve,
    Update,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Error creating attendance record",
            Operation::Retrieve => "Error retrieving attendance record",
            Operation::Update => "Error updating attendance record",
        }
    }
}

/// Logs a store failure and turns it into the caller-facing error.
/// Database details only ever reach the log.
fn reject(operation: Operation, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound { entity, id } => {
            warn!("{} with id={} not found", entity, id);
            ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
        }
        StoreError::InvalidReference(detail) => {
            warn!("{}: {}", operation.failure_message(), detail);
            ApiError::Unprocessable(detail)
        }
        StoreError::Conflict(detail) => {
            warn!("{}: {}", operation.failure_message(), detail);
            ApiError::Conflict(operation.failure_message().to_string())
        }
        other => {
            error!("{}: {}", operation.failure_message(), other);
            ApiError::Internal(operation.failure_message().to_string())
        }
    }
}

fn to_dto(record: attendance_log::Model) -> AttendanceDto {
    AttendanceDto {
        id: record.id,
        student_id: record.student_id,
        date: record.date,
        present: record.present,
        course_id: record.course_id,
    }
}

/// Path ids that are not integers name no record, as with any unknown id.
fn record_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            warn!("Rejected attendance id: {}", rejection.body_text());
            Err(ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))
        }
    }
}

/// Record attendance for a student
#[utoipa::path(
    post,
    path = "/attendance",
    tag = "attendance",
    request_body = CreateAttendanceRequest,
    responses(
        (status = 200, description = "Attendance record created successfully", body = CreatedResponse),
        (status = 422, description = "Malformed body or unknown student, course or user", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_attendance(
    State(state): State<AppState>,
    payload: Result<Json<CreateAttendanceRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    trace!("Entering create_attendance function");

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected attendance payload: {}", rejection.body_text());
        ApiError::Unprocessable(rejection.body_text())
    })?;
    if let Err(errors) = request.validate() {
        warn!("Invalid attendance payload: {}", errors);
        return Err(ApiError::Unprocessable(format!(
            "Invalid attendance record: {}",
            errors
        )));
    }

    debug!(
        "Creating attendance record for student_id={} on date={} (present={})",
        request.student_id, request.date, request.present
    );
    let new = NewAttendance {
        student_id: request.student_id,
        date: request.date,
        present: request.present,
        course_id: request.course_id,
        marked_by_id: request.marked_by_id,
        submitted_by_id: request.submitted_by_id,
    };

    match state.attendance.create(new).await {
        Ok(record) => {
            info!(
                "Attendance record created for student_id={} on date={}",
                record.student_id, record.date
            );
            Ok(Json(CreatedResponse {
                message: "Attendance record created successfully".to_string(),
                id: record.id,
            }))
        }
        Err(e) => Err(reject(Operation::Create, e)),
    }
}

/// Get an attendance record by ID
#[utoipa::path(
    get,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i32, Path, description = "Attendance record ID"),
    ),
    responses(
        (status = 200, description = "Attendance record retrieved successfully", body = AttendanceDto),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, path))]
pub async fn get_attendance(
    path: Result<Path<i32>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<AttendanceDto>, ApiError> {
    let id = record_id(path)?;
    trace!("Entering get_attendance function for id: {}", id);

    match state.attendance.get_by_id(id).await {
        Ok(record) => {
            info!("Retrieved attendance record with id={}", id);
            Ok(Json(to_dto(record)))
        }
        Err(e) => Err(reject(Operation::Retrieve, e)),
    }
}

/// Change the presence flag of an attendance record
#[utoipa::path(
    put,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i32, Path, description = "Attendance record ID"),
    ),
    request_body = UpdateAttendanceRequest,
    responses(
        (status = 200, description = "Attendance record updated successfully", body = MessageResponse),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 422, description = "Malformed body", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state, path, payload))]
pub async fn update_attendance(
    path: Result<Path<i32>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<UpdateAttendanceRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = record_id(path)?;
    trace!("Entering update_attendance function for id: {}", id);

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected update payload for id={}: {}", id, rejection.body_text());
        ApiError::Unprocessable(rejection.body_text())
    })?;

    match state
        .attendance
        .update(id, AttendanceChanges { present: request.present })
        .await
    {
        Ok(_) => {
            info!("Attendance record with id={} updated successfully", id);
            Ok(Json(MessageResponse::new(
                "Attendance record updated successfully",
            )))
        }
        Err(e) => Err(reject(Operation::Update, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = reject(
            Operation::Update,
            StoreError::Database(DbErr::Custom("secret connection string".into())),
        );
        assert_eq!(
            err,
            ApiError::Internal("Error updating attendance record".to_string())
        );
    }

    #[test]
    fn test_not_found_wording() {
        let err = reject(
            Operation::Retrieve,
            StoreError::not_found("attendance record", 9),
        );
        assert_eq!(err, ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    #[test]
    fn test_invalid_reference_passes_detail() {
        let err = reject(
            Operation::Create,
            StoreError::InvalidReference("student with id 5 does not exist".into()),
        );
        assert_eq!(
            err,
            ApiError::Unprocessable("student with id 5 does not exist".to_string())
        );
    }
}
