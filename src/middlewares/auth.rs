use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::AuthService;
use crate::state::AppState;

/// Authenticated user identity extracted from the bearer token. This is the
/// explicit per-request context every repository call is scoped by; a handler
/// that takes an `AuthUser` cannot run without one.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Extractor for AuthUser - usable directly as a handler argument
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Auth middleware - validates the JWT and injects AuthUser into request
/// extensions. Requests without a valid token are rejected here, before any
/// handler or repository code runs.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = AuthService::verify_token(token, &state.config)?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
