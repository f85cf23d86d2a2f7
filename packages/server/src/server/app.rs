//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::domains::scores::ScoreLocks;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    activities, auth, classes, health, participations, scores, semesters, setup, students,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub score_locks: Arc<ScoreLocks>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, jwt_secret: &str, jwt_issuer: String) -> Router {
    let jwt_service = Arc::new(JwtService::new(jwt_secret, jwt_issuer));

    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        score_locks: Arc::new(ScoreLocks::new()),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        // Classes
        .route("/api/classes", get(classes::list).post(classes::create))
        .route("/api/classes/:id", delete(classes::remove))
        // Students
        .route("/api/students", get(students::list).post(students::create))
        .route(
            "/api/students/:id",
            put(students::update).delete(students::remove),
        )
        .route("/api/students/class/:class_id", get(students::list_by_class))
        // Semesters
        .route(
            "/api/semesters",
            get(semesters::list).post(semesters::create),
        )
        .route("/api/semesters/:id/current", put(semesters::set_current))
        // Activities
        .route(
            "/api/activities",
            get(activities::list).post(activities::create),
        )
        .route(
            "/api/activities/:id",
            put(activities::update).delete(activities::remove),
        )
        // Participations
        .route(
            "/api/participations",
            get(participations::list).post(participations::register),
        )
        .route(
            "/api/participations/student/:student_id",
            get(participations::list_by_student),
        )
        .route(
            "/api/participations/:id/status",
            put(participations::update_status),
        )
        // Scores
        .route("/api/scores", get(scores::get_student_score))
        .route("/api/scores/calculate", post(scores::calculate))
        // Bootstrap + health
        .route("/api/setup", get(setup::setup_database))
        .route("/health", get(health::health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
