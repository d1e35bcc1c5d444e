use axum::{
    Router,
    extract::{FromRequest, FromRequestParts, OriginalUri},
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, patch, post},
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::{config::Config, error::AppError};

mod calendar;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub command: weekplan_calendar::Command,
    pub query: weekplan_calendar::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, read_pool: SqlitePool, write_pool: SqlitePool) -> Self {
        Self {
            config,
            command: weekplan_calendar::Command::new(read_pool.clone(), write_pool),
            query: weekplan_calendar::Query(read_pool.clone()),
            pool: read_pool,
        }
    }
}

/// `axum::Json` answering rejections with the error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` answering rejections with the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub async fn fallback(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: format!("Route {method}:{} not found", uri.path()),
    }
}

pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: format!("Method {method} not allowed on {}", uri.path()),
    }
}

pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(err) => {
            tracing::warn!(origin, err = %err, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.cors.origin);

    let api = Router::new()
        .route("/calendar/weekly", get(calendar::weekly))
        .route("/calendar/events", post(calendar::create))
        .route(
            "/calendar/events/{id}",
            patch(calendar::update).delete(calendar::delete),
        );

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .nest("/api", api)
        .fallback(fallback)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .with_state(app_state)
}
