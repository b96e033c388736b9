use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use service::auth::domain::Claims;
use service::Actor;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Caller identified by a valid JWT.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl CurrentUser {
    pub fn actor(&self) -> Actor { Actor::new(self.id, &self.role) }

    pub fn is_admin(&self) -> bool { self.role == models::user::ROLE_ADMIN }
}

impl From<Claims> for CurrentUser {
    fn from(c: Claims) -> Self { Self { id: c.uid, email: c.sub, role: c.role } }
}

/// Token from `Authorization: Bearer ...`, falling back to the `auth_token` cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(ApiError::Unauthorized("invalid Authorization format (expect Bearer)".into())),
        };
    }
    let jar = CookieJar::from_headers(headers);
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let token = token_from_headers(&parts.headers)?
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header and auth_token cookie".into()))?;
        let claims = state.auth.verify_token(&token).map_err(|e| {
            warn!(path = %parts.uri.path(), "token validation failed");
            ApiError::from(e)
        })?;
        Ok(claims.into())
    }
}

/// Route layer for the back-office: a valid token carrying the admin role.
pub async fn require_admin(State(state): State<ServerState>, req: Request, next: Next) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = CurrentUser::from_request_parts(&mut parts, &state).await?;
    if !user.is_admin() {
        warn!(user_id = %user.id, path = %parts.uri.path(), "admin route denied");
        return Err(ApiError::Forbidden("administrator role required".into()));
    }
    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
