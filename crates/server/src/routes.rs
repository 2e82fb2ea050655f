use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::ServerState;

pub mod control;
pub mod records;

/// Versioned prefix every endpoint lives under.
pub const API_PREFIX: &str = "/simpleservice/api/v1.0";

/// Build the full application router: control endpoints plus record CRUD.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let control_routes = Router::new()
        .route("/status", get(control::status))
        .route("/shutdown", post(control::shutdown));

    let record_routes = Router::new()
        .route(
            "/record",
            get(records::list_records)
                .post(records::add_record)
                .put(records::update_record)
                .delete(records::remove_record),
        )
        .route("/record/:name", get(records::get_record_by_name));

    Router::new()
        .nest(API_PREFIX, control_routes.merge(record_routes))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
