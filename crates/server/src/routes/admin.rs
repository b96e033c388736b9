use axum::{
    extract::{MatchedPath, Path, State},
    response::Html,
    Json,
};
use uuid::Uuid;

use common::types::{Message, Saved};
use models::{booking, comment};
use service::bookings::{self, BookingInput};
use service::comments::{self, CommentInput};
use service::pagination::{Page, RouteContext};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

async fn bookings_page(state: &ServerState, route: &MatchedPath, page: u64) -> Result<Json<Page<booking::Model>>, ApiError> {
    let ctx = RouteContext::new(route.as_str());
    let cfg = &state.pagination;
    Ok(Json(bookings::admin_page(&state.db, &ctx, &cfg.nav_template, page, cfg.admin_bookings_limit).await?))
}

async fn comments_page(state: &ServerState, route: &MatchedPath, page: u64) -> Result<Json<Page<comment::Model>>, ApiError> {
    let ctx = RouteContext::new(route.as_str());
    let cfg = &state.pagination;
    Ok(Json(comments::admin_page(&state.db, &ctx, &cfg.nav_template, page, cfg.admin_comments_limit).await?))
}

#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "admin",
    responses(
        (status = 200, description = "First page of bookings"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn bookings_index(State(state): State<ServerState>, route: MatchedPath) -> Result<Json<Page<booking::Model>>, ApiError> {
    bookings_page(&state, &route, 1).await
}

#[utoipa::path(
    get,
    path = "/admin/bookings/{page}",
    tag = "admin",
    params(("page" = u64, Path,)),
    responses(
        (status = 200, description = "Page of bookings"),
        (status = 400, description = "Bad page")
    )
)]
pub async fn bookings_at(State(state): State<ServerState>, route: MatchedPath, Path(page): Path<u64>) -> Result<Json<Page<booking::Model>>, ApiError> {
    bookings_page(&state, &route, page).await
}

#[utoipa::path(
    put,
    path = "/admin/booking/{id}/edit",
    tag = "admin",
    params(("id" = Uuid, Path,)),
    request_body = crate::openapi::BookingInputDoc,
    responses((status = 200, description = "Saved"), (status = 404, description = "Not Found"))
)]
pub async fn booking_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<BookingInput>,
) -> Result<Json<Saved<booking::Model>>, ApiError> {
    let updated = bookings::update_booking(&state.db, id, input).await?;
    Ok(Json(Saved::new(format!("booking n° {} has been saved", updated.id), updated)))
}

#[utoipa::path(
    delete,
    path = "/admin/booking/{id}/delete",
    tag = "admin",
    params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn booking_delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Message>, ApiError> {
    bookings::delete_booking(&state.db, id).await?;
    Ok(Json(Message::new(format!("booking n° {id} has been deleted"))))
}

#[utoipa::path(
    get,
    path = "/admin/comments",
    tag = "admin",
    responses(
        (status = 200, description = "First page of comments"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn comments_index(State(state): State<ServerState>, route: MatchedPath) -> Result<Json<Page<comment::Model>>, ApiError> {
    comments_page(&state, &route, 1).await
}

#[utoipa::path(
    get,
    path = "/admin/comments/{page}",
    tag = "admin",
    params(("page" = u64, Path,)),
    responses(
        (status = 200, description = "Page of comments"),
        (status = 400, description = "Bad page")
    )
)]
pub async fn comments_at(State(state): State<ServerState>, route: MatchedPath, Path(page): Path<u64>) -> Result<Json<Page<comment::Model>>, ApiError> {
    comments_page(&state, &route, page).await
}

/// HTML navigation fragment for the comment list; links point at the listing pages.
#[utoipa::path(
    get,
    path = "/admin/comments/{page}/nav",
    tag = "admin",
    params(("page" = u64, Path,)),
    responses((status = 200, description = "Pagination widget", content_type = "text/html"))
)]
pub async fn comments_nav(State(state): State<ServerState>, route: MatchedPath, Path(page): Path<u64>) -> Result<Html<String>, ApiError> {
    let listing = route.as_str().trim_end_matches("/nav");
    let ctx = RouteContext::new(listing);
    let cfg = &state.pagination;
    let out = comments::admin_nav(&state.db, &*state.nav, &ctx, &cfg.nav_template, page, cfg.admin_comments_limit).await?;
    let html = String::from_utf8(out).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(html))
}

#[utoipa::path(
    put,
    path = "/admin/comment/{id}/edit",
    tag = "admin",
    params(("id" = Uuid, Path,)),
    request_body = crate::openapi::CommentInputDoc,
    responses((status = 200, description = "Saved"), (status = 404, description = "Not Found"))
)]
pub async fn comment_edit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CommentInput>,
) -> Result<Json<Saved<comment::Model>>, ApiError> {
    let updated = comments::update_comment(&state.db, id, input).await?;
    Ok(Json(Saved::new(format!("comment n° {} has been saved", updated.id), updated)))
}

#[utoipa::path(
    delete,
    path = "/admin/comment/{id}/delete",
    tag = "admin",
    params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn comment_delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Message>, ApiError> {
    comments::delete_comment(&state.db, id).await?;
    Ok(Json(Message::new(format!("comment n° {id} has been deleted"))))
}
