//! JSON API over the stores.

mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::UserDirectory;
use crate::store::{Latency, Stores};

/// Shared handler state. Clones share the same stores.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub users: UserDirectory,
    /// Delay scale applied to the simulated logins.
    pub latency: Latency,
}

impl AppState {
    pub fn new(stores: Stores, latency: Latency) -> Self {
        Self {
            stores,
            users: UserDirectory::seeded(),
            latency,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Auth
        .route("/auth/login", post(handlers::login))
        .route("/auth/google", post(handlers::login_with_google))
        // Grades
        .route("/grades", get(handlers::list_grades).post(handlers::create_grade))
        .route("/grades/statistics", get(handlers::grade_statistics))
        .route(
            "/grades/{id}",
            put(handlers::update_grade).delete(handlers::delete_grade),
        )
        .route("/students/{id}/average", get(handlers::student_average))
        // Attendance
        .route(
            "/attendance",
            get(handlers::list_attendance).post(handlers::mark_attendance),
        )
        .route("/attendance/bulk", post(handlers::bulk_mark_attendance))
        .route("/attendance/stats", get(handlers::attendance_stats))
        .route(
            "/attendance/{id}",
            put(handlers::update_attendance).delete(handlers::delete_attendance),
        )
        // Calendar
        .route("/events", get(handlers::list_events).post(handlers::create_event))
        .route("/events/upcoming", get(handlers::upcoming_events))
        .route("/events/import", post(handlers::import_events))
        .route(
            "/events/{id}",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        // Weather
        .route("/weather/current", get(handlers::current_weather))
        .route("/weather/forecast", get(handlers::weather_forecast))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
