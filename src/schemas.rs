use std::sync::Arc;
use std::time::Duration;

use common::{
    AttendanceDto, CreateAttendanceRequest, CreatedResponse, MessageResponse,
    UpdateAttendanceRequest,
};
use model::entities::attendance_log;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use store::{AttendanceChanges, AttendanceStore, NewAttendance, Repository};
use utoipa::{OpenApi, ToSchema};

/// Attendance data access as the handlers see it.
pub type AttendanceRepository = Arc<
    dyn Repository<
            Record = attendance_log::Model,
            New = NewAttendance,
            Changes = AttendanceChanges,
        >,
>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Attendance records
    pub attendance: AttendanceRepository,
    /// Upper bound on the time spent serving one request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(db: DatabaseConnection, request_timeout: Duration) -> Self {
        let attendance: AttendanceRepository = Arc::new(AttendanceStore::new(db.clone()));
        Self {
            db,
            attendance,
            request_timeout,
        }
    }
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::attendance::create_attendance,
        crate::handlers::attendance::get_attendance,
        crate::handlers::attendance::update_attendance,
    ),
    components(
        schemas(
            CreateAttendanceRequest,
            UpdateAttendanceRequest,
            AttendanceDto,
            CreatedResponse,
            MessageResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "attendance", description = "Attendance record endpoints"),
    ),
    info(
        title = "Attendance API",
        description = "Record, look up and correct student attendance",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
