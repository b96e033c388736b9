pub mod admin;
pub mod ads;
pub mod auth;
pub mod home;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public pages, member actions and the back-office.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/", get(home::home))
        .route("/hello", get(home::hello))
        .route("/hello/:name", get(home::hello_name))
        .route("/hello/:name/age/:age", get(home::hello_name_age))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Handlers taking `CurrentUser` reject anonymous callers themselves.
    let ads_routes = Router::new()
        .route("/ads", get(ads::list).post(ads::create))
        .route("/ads/:slug", get(ads::show).put(ads::update).delete(ads::delete))
        .route("/ads/:slug/bookings", post(ads::book))
        .route("/ads/:slug/comments", post(ads::comment));

    let admin_routes = Router::new()
        .route("/admin/bookings", get(admin::bookings_index))
        .route("/admin/bookings/:page", get(admin::bookings_at))
        .route("/admin/booking/:id/edit", put(admin::booking_edit))
        .route("/admin/booking/:id/delete", delete(admin::booking_delete))
        .route("/admin/comments", get(admin::comments_index))
        .route("/admin/comments/:page", get(admin::comments_at))
        .route("/admin/comments/:page/nav", get(admin::comments_nav))
        .route("/admin/comment/:id/edit", put(admin::comment_edit))
        .route("/admin/comment/:id/delete", delete(admin::comment_delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), crate::auth::require_admin));

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    public
        .merge(ads_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
}
