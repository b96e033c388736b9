use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use common::types::Message;
use configs::{AuthConfig, PaginationConfig};
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthService, TokenSettings};
use service::pagination::{HtmlNavRenderer, ViewRenderer};

use crate::auth::AUTH_COOKIE;
use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub pagination: PaginationConfig,
    pub nav: Arc<dyn ViewRenderer>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: &AuthConfig, pagination: PaginationConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        let nav: Arc<dyn ViewRenderer> = Arc::new(HtmlNavRenderer::new(pagination.nav_template.clone()));
        Self { db, auth: Arc::new(AuthService::new(repo, TokenSettings::from(auth))), pagination, nav }
    }
}

#[derive(Serialize)]
pub struct RegisterOutput { pub user_id: Uuid }

#[derive(Serialize)]
pub struct LoginOutput { pub user_id: Uuid, pub email: String, pub full_name: String, pub role: String, pub token: String }

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { user_id: user.id })))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let user = session.user;
    let out = LoginOutput {
        user_id: user.id,
        full_name: format!("{} {}", user.first_name, user.last_name),
        email: user.email,
        role: user.role,
        token: session.token,
    };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses((status = 200, description = "Logged out"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Message>) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(Message::new("you are now logged out")))
}
