use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use common::types::{Message, Saved};
use models::{ad, booking, comment};
use service::ads::{self, AdInput, AdWithImages};
use service::bookings::{self, BookingInput};
use service::comments::{self, CommentInput};

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/ads", tag = "ads", responses((status = 200, description = "All ads")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ad::Model>>, ApiError> {
    Ok(Json(ads::list_ads(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/ads",
    tag = "ads",
    request_body = crate::openapi::AdInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(input): Json<AdInput>,
) -> Result<(StatusCode, Json<Saved<AdWithImages>>), ApiError> {
    let created = ads::create_ad(&state.db, user.id, input).await?;
    let msg = format!("the ad \"{}\" has been saved", created.ad.title);
    Ok((StatusCode::CREATED, Json(Saved::new(msg, created))))
}

#[utoipa::path(
    get,
    path = "/ads/{slug}",
    tag = "ads",
    params(("slug" = String, Path,)),
    responses(
        (status = 200, description = "Ad with images"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn show(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<AdWithImages>, ApiError> {
    Ok(Json(ads::find_by_slug(&state.db, &slug).await?))
}

#[utoipa::path(
    put,
    path = "/ads/{slug}",
    tag = "ads",
    params(("slug" = String, Path,)),
    request_body = crate::openapi::AdInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Json(input): Json<AdInput>,
) -> Result<Json<Saved<AdWithImages>>, ApiError> {
    let updated = ads::update_ad(&state.db, &slug, &user.actor(), input).await?;
    let msg = format!("changes to the ad \"{}\" have been saved", updated.ad.title);
    Ok(Json(Saved::new(msg, updated)))
}

#[utoipa::path(
    delete,
    path = "/ads/{slug}",
    tag = "ads",
    params(("slug" = String, Path,)),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let removed = ads::delete_ad(&state.db, &slug, &user.actor()).await?;
    Ok(Json(Message::new(format!("the ad \"{}\" has been deleted", removed.title))))
}

#[utoipa::path(
    post,
    path = "/ads/{slug}/bookings",
    tag = "ads",
    params(("slug" = String, Path,)),
    request_body = crate::openapi::BookingInputDoc,
    responses(
        (status = 201, description = "Booked"),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Dates unavailable")
    )
)]
pub async fn book(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Json(input): Json<BookingInput>,
) -> Result<(StatusCode, Json<Saved<booking::Model>>), ApiError> {
    let created = bookings::book_ad(&state.db, &slug, user.id, input).await?;
    let msg = format!("booking n° {} has been saved", created.id);
    Ok((StatusCode::CREATED, Json(Saved::new(msg, created))))
}

#[utoipa::path(
    post,
    path = "/ads/{slug}/comments",
    tag = "ads",
    params(("slug" = String, Path,)),
    request_body = crate::openapi::CommentInputDoc,
    responses(
        (status = 201, description = "Commented"),
        (status = 400, description = "Bad Request")
    )
)]
pub async fn comment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Json(input): Json<CommentInput>,
) -> Result<(StatusCode, Json<Saved<comment::Model>>), ApiError> {
    let created = comments::add_comment(&state.db, &slug, user.id, input).await?;
    let msg = format!("comment n° {} has been saved", created.id);
    Ok((StatusCode::CREATED, Json(Saved::new(msg, created))))
}
