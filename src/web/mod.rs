use axum::{
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod routes;

/// Builds the whole application. Shared by the binary and the API tests.
pub fn app(pool: SqlitePool) -> Router {
    Router::new()
        .route("/register", post(routes::register::register_handler))
        .route("/verify", get(routes::verify::verify_handler))
        .route("/persons", get(routes::persons::persons_handler))
        .route(
            "/persons/:person_id/ticket",
            get(routes::ticket::ticket_handler),
        )
        // Registration data changes under the client's feet; never cache.
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(pool)
}
