#[cfg(test)]
mod integration_tests {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::test_utils::test_utils::{init_test_tracing, setup_test_app, setup_test_app_state};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{
        AttendanceDto, CreateAttendanceRequest, CreatedResponse, MessageResponse,
        UpdateAttendanceRequest,
    };
    use model::entities::{attendance_log, prelude::AttendanceLog};
    use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use store::{AttendanceChanges, NewAttendance, Repository, StoreError};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
    }

    async fn create_record(server: &TestServer, request: &CreateAttendanceRequest) -> i32 {
        let response = server.post("/attendance").json(request).await;
        response.assert_status(StatusCode::OK);
        let body: CreatedResponse = response.json();
        body.id
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_create_attendance() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/attendance")
            .json(&CreateAttendanceRequest::new(fixtures.student_id, date(1), true))
            .await;

        response.assert_status(StatusCode::OK);
        let body: CreatedResponse = response.json();
        assert_eq!(body.message, "Attendance record created successfully");
        assert!(body.id > 0);
    }

    #[tokio::test]
    async fn test_create_honors_absent_flag() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let id = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.student_id, date(2), false),
        )
        .await;

        let response = server.get(&format!("/attendance/{}", id)).await;
        response.assert_status(StatusCode::OK);
        let record: AttendanceDto = response.json();
        assert!(!record.present);
    }

    #[tokio::test]
    async fn test_get_returns_submitted_values() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let id = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.other_student_id, date(3), true),
        )
        .await;

        let response = server.get(&format!("/attendance/{}", id)).await;
        response.assert_status(StatusCode::OK);

        let body: serde_json::Value = response.json();
        assert_eq!(
            body,
            json!({
                "id": id,
                "student_id": fixtures.other_student_id,
                "updated_at": "2024-10-03",
                "present": true
            })
        );
    }

    #[tokio::test]
    async fn test_create_with_course_and_marker() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let mut request = CreateAttendanceRequest::new(fixtures.student_id, date(4), true);
        request.course_id = Some(fixtures.course_id);
        request.marked_by_id = Some(fixtures.teacher_id);
        request.submitted_by_id = Some(fixtures.teacher_id);
        let id = create_record(&server, &request).await;

        let record: AttendanceDto = server.get(&format!("/attendance/{}", id)).await.json();
        assert_eq!(record.course_id, Some(fixtures.course_id));
        assert_eq!(record.date, date(4));
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let (app, _) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/attendance/987654").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body, json!({"message": "Attendance record not found"}));
    }

    #[tokio::test]
    async fn test_get_non_numeric_id() {
        let (app, _) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/attendance/yesterday").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Attendance record not found");
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let id = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.student_id, date(7), true),
        )
        .await;

        let response = server
            .put(&format!("/attendance/{}", id))
            .json(&UpdateAttendanceRequest { present: false })
            .await;
        response.assert_status(StatusCode::OK);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Attendance record updated successfully");

        let record: AttendanceDto = server.get(&format!("/attendance/{}", id)).await.json();
        assert!(!record.present);
        assert_eq!(record.student_id, fixtures.student_id);
        assert_eq!(record.date, date(7));
    }

    #[tokio::test]
    async fn test_update_missing_record_inserts_nothing() {
        let (state, _) = setup_test_app_state().await;
        let db = state.db.clone();
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .put("/attendance/4040")
            .json(&UpdateAttendanceRequest { present: true })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Attendance record not found");
        assert_eq!(AttendanceLog::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_non_boolean() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let id = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.student_id, date(8), true),
        )
        .await;

        let response = server
            .put(&format!("/attendance/{}", id))
            .json(&json!({"present": "nope"}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let record: AttendanceDto = server.get(&format!("/attendance/{}", id)).await.json();
        assert!(record.present);
    }

    #[tokio::test]
    async fn test_create_for_unknown_student() {
        let (state, _) = setup_test_app_state().await;
        let db = state.db.clone();
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .post("/attendance")
            .json(&CreateAttendanceRequest::new(5000, date(9), true))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: MessageResponse = response.json();
        assert!(body.message.contains("student"), "{}", body.message);
        assert_eq!(AttendanceLog::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_free_form_date() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/attendance")
            .json(&json!({
                "student_id": fixtures.student_id,
                "updated_at": "next monday",
                "present": true
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_student_id() {
        let (app, _) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/attendance")
            .json(&CreateAttendanceRequest::new(0, date(10), true))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_records_are_independent() {
        let (app, fixtures) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.student_id, date(14), true),
        )
        .await;
        let second = create_record(
            &server,
            &CreateAttendanceRequest::new(fixtures.student_id, date(15), true),
        )
        .await;
        assert_ne!(first, second);

        server
            .put(&format!("/attendance/{}", second))
            .json(&UpdateAttendanceRequest { present: false })
            .await
            .assert_status(StatusCode::OK);

        let untouched: AttendanceDto = server.get(&format!("/attendance/{}", first)).await.json();
        let changed: AttendanceDto = server.get(&format!("/attendance/{}", second)).await.json();
        assert!(untouched.present);
        assert!(!changed.present);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (app, _) = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["paths"]["/attendance/{id}"].is_object());
    }

    /// Repository whose every call fails the way a lost connection would.
    struct UnreachableDatabase;

    fn unreachable() -> StoreError {
        StoreError::Database(DbErr::Custom("connection to 10.0.0.5:3306 refused".into()))
    }

    #[async_trait]
    impl Repository for UnreachableDatabase {
        type Record = attendance_log::Model;
        type New = NewAttendance;
        type Changes = AttendanceChanges;

        async fn create(&self, _new: NewAttendance) -> store::Result<attendance_log::Model> {
            Err(unreachable())
        }

        async fn get_by_id(&self, _id: i32) -> store::Result<attendance_log::Model> {
            Err(unreachable())
        }

        async fn update(
            &self,
            _id: i32,
            _changes: AttendanceChanges,
        ) -> store::Result<attendance_log::Model> {
            Err(unreachable())
        }
    }

    #[tokio::test]
    async fn test_database_failures_are_generic_500s() {
        init_test_tracing();
        let (state, fixtures) = setup_test_app_state().await;
        let state = AppState {
            attendance: Arc::new(UnreachableDatabase),
            request_timeout: Duration::from_secs(5),
            ..state
        };
        let server = TestServer::new(create_router(state)).unwrap();

        let created = server
            .post("/attendance")
            .json(&CreateAttendanceRequest::new(fixtures.student_id, date(20), true))
            .await;
        created.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageResponse = created.json();
        assert_eq!(body.message, "Error creating attendance record");

        let fetched = server.get("/attendance/1").await;
        fetched.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageResponse = fetched.json();
        assert_eq!(body.message, "Error retrieving attendance record");

        let updated = server
            .put("/attendance/1")
            .json(&UpdateAttendanceRequest { present: false })
            .await;
        updated.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: MessageResponse = updated.json();
        assert_eq!(body.message, "Error updating attendance record");
        assert!(!body.message.contains("10.0.0.5"));
    }
}
