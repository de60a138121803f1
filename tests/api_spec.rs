use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use edumanage::api::{create_router, AppState};
use edumanage::models::*;
use edumanage::store::{Latency, Stores};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    create_router(AppState::new(Stores::seeded(Latency::none()), Latency::none()))
}

fn setup() -> TestServer {
    TestServer::new(app()).expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn login_returns_matching_user() {
        let server = setup();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "maria.gonzalez@escuela.edu", "password": "x" }))
            .await;

        response.assert_status_ok();
        let user: User = response.json();
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.teacher_id.as_deref(), Some("T001"));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let server = setup();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "nope@x.com", "password": "x" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_rejects_malformed_body() {
        let server = setup();

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "password": "x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn google_login_returns_student() {
        let server = setup();

        let user: User = server.post("/api/v1/auth/google").await.json();

        assert!(user.id.starts_with("google_"));
        assert_eq!(user.student_id.as_deref(), Some("G001"));
    }
}

mod grades {
    use super::*;

    #[tokio::test]
    async fn lists_all_or_filtered() {
        let server = setup();

        let all: Vec<Grade> = server.get("/api/v1/grades").await.json();
        assert_eq!(all.len(), 3);

        let student: Vec<Grade> = server
            .get("/api/v1/grades")
            .add_query_param("studentId", "S002")
            .await
            .json();
        assert_eq!(student.len(), 1);
        assert_eq!(student[0].kind, GradeKind::Quiz);
    }

    #[tokio::test]
    async fn create_then_update_then_delete() {
        let server = setup();

        let response = server
            .post("/api/v1/grades")
            .json(&json!({
                "studentId": "S003",
                "subjectId": "SUBJ001",
                "teacherId": "T001",
                "score": 64,
                "maxScore": 80,
                "type": "project",
                "description": "Proyecto final",
                "date": "2024-02-01",
                "semester": "2024-1"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let grade: Grade = response.json();
        assert_eq!(grade.percentage(), 80.0);

        let updated: Grade = server
            .put(&format!("/api/v1/grades/{}", grade.id))
            .json(&json!({ "score": 72 }))
            .await
            .json();
        assert_eq!(updated.score, 72.0);
        assert_eq!(updated.description, "Proyecto final");

        server
            .delete(&format!("/api/v1/grades/{}", grade.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn update_of_missing_grade_is_404() {
        let server = setup();

        server
            .put("/api/v1/grades/nonexistent-id")
            .json(&json!({ "score": 10 }))
            .await
            .assert_status_not_found();

        let all: Vec<Grade> = server.get("/api/v1/grades").await.json();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn invalid_grade_type_is_400() {
        let server = setup();

        server
            .put("/api/v1/grades/1")
            .json(&json!({ "type": "homework" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn zero_max_score_is_400() {
        let server = setup();

        server
            .post("/api/v1/grades")
            .json(&json!({
                "studentId": "S003",
                "subjectId": "SUBJ001",
                "teacherId": "T001",
                "score": 10,
                "maxScore": 0,
                "type": "quiz",
                "description": "Quiz",
                "date": "2024-02-01",
                "semester": "2024-1"
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/v1/grades/1")
            .json(&json!({ "maxScore": 0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let stats: GradeStatistics = server.get("/api/v1/grades/statistics").await.json();
        assert_eq!(stats.total_grades, 3);
        assert!(stats.highest_score.is_finite());
    }

    #[tokio::test]
    async fn student_average_and_statistics() {
        let server = setup();

        let average: Value = server
            .get("/api/v1/students/S001/average")
            .add_query_param("subjectId", "SUBJ001")
            .await
            .json();
        assert_eq!(average["average"], json!(85.0));

        let stats: GradeStatistics = server.get("/api/v1/grades/statistics").await.json();
        assert_eq!(stats.total_grades, 3);
        assert_eq!(stats.grade_distribution.len(), 5);
    }
}

mod attendance {
    use super::*;

    #[tokio::test]
    async fn requires_a_filter() {
        let server = setup();
        server
            .get("/api/v1/attendance")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_mark_then_stats() {
        let server = setup();
        let record = |student: &str, status: &str| {
            json!({
                "studentId": student,
                "subjectId": "SUBJ003",
                "teacherId": "T001",
                "date": "2024-01-22",
                "status": status,
                "period": "3rd Period"
            })
        };

        let response = server
            .post("/api/v1/attendance/bulk")
            .json(&json!([record("S001", "present"), record("S002", "excused")]))
            .await;
        response.assert_status(StatusCode::CREATED);
        let marked: Vec<Attendance> = response.json();
        assert_eq!(marked.len(), 2);

        let stats: AttendanceStats = server
            .get("/api/v1/attendance/stats")
            .add_query_param("subjectId", "SUBJ003")
            .await
            .json();
        assert_eq!(stats.total_classes, 2);
        assert_eq!(stats.excused_count, 1);
        assert_eq!(stats.attendance_rate, 50.0);
    }

    #[tokio::test]
    async fn delete_of_missing_record_is_404() {
        let server = setup();
        server
            .delete("/api/v1/attendance/missing")
            .await
            .assert_status_not_found();
    }
}

mod calendar {
    use super::*;

    #[tokio::test]
    async fn lists_range_and_type() {
        let server = setup();

        let ranged: Vec<CalendarEvent> = server
            .get("/api/v1/events")
            .add_query_param("startDate", "2024-01-26")
            .add_query_param("endDate", "2024-02-28")
            .await
            .json();
        let ids: Vec<_> = ranged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        let holidays: Vec<CalendarEvent> = server
            .get("/api/v1/events")
            .add_query_param("type", "holiday")
            .await
            .json();
        assert_eq!(holidays.len(), 1);
    }

    #[tokio::test]
    async fn import_appends_google_event() {
        let server = setup();

        let imported: Vec<CalendarEvent> = server.post("/api/v1/events/import").await.json();
        assert_eq!(imported[0].id, "google_1");

        let all: Vec<CalendarEvent> = server.get("/api/v1/events").await.json();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn upcoming_respects_limit() {
        let server = setup();

        server
            .post("/api/v1/events")
            .json(&json!({
                "title": "Graduación",
                "date": "2999-06-30",
                "startTime": "18:00",
                "endTime": "21:00",
                "type": "event"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let upcoming: Vec<CalendarEvent> = server
            .get("/api/v1/events/upcoming")
            .add_query_param("limit", "1")
            .await
            .json();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Graduación");
    }
}

mod weather {
    use super::*;

    #[tokio::test]
    async fn current_uses_default_city() {
        let server = setup();

        let reading: WeatherData = server.get("/api/v1/weather/current").await.json();
        assert_eq!(reading.city, "Mexico City");
    }

    #[tokio::test]
    async fn forecast_returns_requested_days() {
        let server = setup();

        let forecast: Vec<WeatherData> = server
            .get("/api/v1/weather/forecast")
            .add_query_param("city", "Monterrey")
            .add_query_param("days", "3")
            .await
            .json();
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|w| w.city == "Monterrey"));
    }

    #[tokio::test]
    async fn forecast_rejects_oversized_days() {
        let server = setup();

        server
            .get("/api/v1/weather/forecast")
            .add_query_param("days", "17")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/v1/weather/forecast")
            .add_query_param("days", usize::MAX.to_string())
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let longest: Vec<WeatherData> = server
            .get("/api/v1/weather/forecast")
            .add_query_param("days", "16")
            .await
            .json();
        assert_eq!(longest.len(), 16);
    }
}
