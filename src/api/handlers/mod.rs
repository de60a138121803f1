use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::Error;
use crate::models::*;
use crate::session::{MemorySessionStorage, Session};
use crate::store::{
    DEFAULT_FORECAST_DAYS, DEFAULT_UPCOMING_LIMIT, DEFAULT_WEATHER_CITY, MAX_FORECAST_DAYS,
};

use super::AppState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Map a store or session error to a response.
///
/// Missing records and bad credentials are reported to the client as-is.
/// Anything else is logged server-side and returned as a generic message.
fn api_error(e: Error) -> (StatusCode, String) {
    match e {
        Error::NotFound { .. } => {
            tracing::warn!("Not found: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        Error::InvalidInput(_) => {
            tracing::warn!("Rejected input: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
        Error::Storage(_) | Error::Serialization(_) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Unwrap a JSON body, reporting any decoding failure as 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(input)| input).map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        (StatusCode::BAD_REQUEST, rejection.body_text())
    })
}

fn bad_request(msg: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Auth
// ============================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A throwaway session so the API never holds login state between requests.
fn ephemeral_session(state: &AppState) -> Session {
    Session::with_directory(
        Arc::new(MemorySessionStorage::new()),
        state.users.clone(),
        state.latency,
    )
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let input = json_body(payload)?;
    ephemeral_session(&state)
        .login(&input.email, &input.password)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn login_with_google(State(state): State<AppState>) -> ApiResult<Json<User>> {
    ephemeral_session(&state)
        .login_with_google()
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Grades
// ============================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeQuery {
    pub student_id: Option<String>,
    pub teacher_id: Option<String>,
    pub subject_id: Option<String>,
}

/// At most one filter applies, checked in the order student, teacher,
/// subject. No filter lists everything.
pub async fn list_grades(
    State(state): State<AppState>,
    Query(query): Query<GradeQuery>,
) -> ApiResult<Json<Vec<Grade>>> {
    let store = &state.stores.grades;
    let result = if let Some(id) = &query.student_id {
        store.grades_by_student(id).await
    } else if let Some(id) = &query.teacher_id {
        store.grades_by_teacher(id).await
    } else if let Some(id) = &query.subject_id {
        store.grades_by_subject(id).await
    } else {
        store.all_grades().await
    };
    result.map(Json).map_err(api_error)
}

pub async fn create_grade(
    State(state): State<AppState>,
    payload: Result<Json<CreateGradeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Grade>)> {
    let input = json_body(payload)?;
    state
        .stores
        .grades
        .create_grade(input)
        .await
        .map(|g| (StatusCode::CREATED, Json(g)))
        .map_err(api_error)
}

pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateGradeInput>, JsonRejection>,
) -> ApiResult<Json<Grade>> {
    let input = json_body(payload)?;
    state
        .stores
        .grades
        .update_grade(&id, input)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .stores
        .grades
        .delete_grade(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(api_error)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageQuery {
    pub subject_id: Option<String>,
}

pub async fn student_average(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Query(query): Query<AverageQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let average = state
        .stores
        .grades
        .student_average(&student_id, query.subject_id.as_deref())
        .await
        .map_err(api_error)?;

    Ok(Json(serde_json::json!({
        "studentId": student_id,
        "average": average,
    })))
}

pub async fn grade_statistics(State(state): State<AppState>) -> ApiResult<Json<GradeStatistics>> {
    state
        .stores
        .grades
        .grade_statistics()
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Attendance
// ============================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub student_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub date: Option<String>,
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>,
}

/// Requires one of `studentId`, `date`, `teacherId` or `subjectId`.
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> ApiResult<Json<Vec<Attendance>>> {
    let store = &state.stores.attendance;
    let result = if let Some(id) = &query.student_id {
        store
            .attendance_by_student(id, query.start_date.as_deref(), query.end_date.as_deref())
            .await
    } else if let Some(date) = &query.date {
        store
            .attendance_by_date(date, query.subject_id.as_deref())
            .await
    } else if let Some(id) = &query.teacher_id {
        store.attendance_by_teacher(id).await
    } else if let Some(id) = &query.subject_id {
        store.attendance_by_subject(id).await
    } else {
        return Err(bad_request(
            "One of studentId, date, teacherId or subjectId is required",
        ));
    };
    result.map(Json).map_err(api_error)
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    payload: Result<Json<MarkAttendanceInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Attendance>)> {
    let input = json_body(payload)?;
    state
        .stores
        .attendance
        .mark_attendance(input)
        .await
        .map(|a| (StatusCode::CREATED, Json(a)))
        .map_err(api_error)
}

pub async fn bulk_mark_attendance(
    State(state): State<AppState>,
    payload: Result<Json<Vec<MarkAttendanceInput>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vec<Attendance>>)> {
    let batch = json_body(payload)?;
    state
        .stores
        .attendance
        .bulk_mark_attendance(batch)
        .await
        .map(|records| (StatusCode::CREATED, Json(records)))
        .map_err(api_error)
}

pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAttendanceInput>, JsonRejection>,
) -> ApiResult<Json<Attendance>> {
    let input = json_body(payload)?;
    state
        .stores
        .attendance
        .update_attendance(&id, input)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .stores
        .attendance
        .delete_attendance(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(api_error)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatsQuery {
    pub student_id: Option<String>,
    pub subject_id: Option<String>,
}

pub async fn attendance_stats(
    State(state): State<AppState>,
    Query(query): Query<AttendanceStatsQuery>,
) -> ApiResult<Json<AttendanceStats>> {
    state
        .stores
        .attendance
        .attendance_stats(query.student_id.as_deref(), query.subject_id.as_deref())
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Calendar
// ============================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EventKind>,
}

/// A `type` filter takes precedence over the date range.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    let store = &state.stores.calendar;
    let result = match query.kind {
        Some(kind) => store.events_by_type(kind).await,
        None => {
            store
                .events(query.start_date.as_deref(), query.end_date.as_deref())
                .await
        }
    };
    result.map(Json).map_err(api_error)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

pub async fn upcoming_events(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    state
        .stores
        .calendar
        .upcoming_events(query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT))
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CalendarEvent>)> {
    let input = json_body(payload)?;
    state
        .stores
        .calendar
        .create_event(input)
        .await
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(api_error)
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEventInput>, JsonRejection>,
) -> ApiResult<Json<CalendarEvent>> {
    let input = json_body(payload)?;
    state
        .stores
        .calendar
        .update_event(&id, input)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .stores
        .calendar
        .delete_event(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(api_error)
}

pub async fn import_events(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CalendarEvent>>> {
    state
        .stores
        .calendar
        .import_from_google_calendar()
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================
// Weather
// ============================================================

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub days: Option<usize>,
}

impl WeatherQuery {
    fn city(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_WEATHER_CITY)
    }
}

pub async fn current_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<Json<WeatherData>> {
    state
        .stores
        .weather
        .current_weather(query.city())
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<Json<Vec<WeatherData>>> {
    let days = query.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    if days > MAX_FORECAST_DAYS {
        tracing::warn!(days, "Rejected forecast request");
        return Err(bad_request(&format!(
            "days must be at most {}",
            MAX_FORECAST_DAYS
        )));
    }

    state
        .stores
        .weather
        .weather_forecast(query.city(), days)
        .await
        .map(Json)
        .map_err(api_error)
}
