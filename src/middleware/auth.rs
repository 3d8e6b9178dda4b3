use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::query::{AccessScope, Role};

/// Request-scoped authentication context decoded from the session cookie.
///
/// Injected as an axum Extension by `session_auth`; never stored anywhere
/// process-wide.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub admin_id: i32,
    pub role: Role,
    pub center_id: Option<i32>,
}

impl AuthSession {
    pub fn scope(&self) -> AccessScope {
        AccessScope::resolve(self.role, self.center_id)
    }
}

impl From<Claims> for AuthSession {
    fn from(claims: Claims) -> Self {
        Self {
            admin_id: claims.sub,
            role: claims.role,
            center_id: claims.center_id,
        }
    }
}

/// Session middleware for every protected API route.
///
/// Missing or invalid sessions get a JSON 401 rather than a login redirect,
/// so browser and API clients see the same denial shape.
pub async fn session_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = claims_from_headers(&headers)?;
    request.extensions_mut().insert(AuthSession::from(claims));
    Ok(next.run(request).await)
}

/// Gate for Admin-only routes (centers and admin-user management).
/// Layered inside `session_auth`, so the extension is always present.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let session = request
        .extensions()
        .get::<AuthSession>()
        .ok_or_else(|| ApiError::unauthorized("Not signed in"))?;

    match session.role {
        Role::Admin => Ok(next.run(request).await),
        Role::CenterAdmin => Err(ApiError::forbidden("Admin access required")),
    }
}

fn claims_from_headers(headers: &HeaderMap) -> Result<Claims, ApiError> {
    let cookie_header = headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Not signed in"))?;

    let token = auth::token_from_cookie_header(cookie_header)
        .ok_or_else(|| ApiError::unauthorized("Not signed in"))?;

    auth::decode_token(&token).map_err(|_| ApiError::unauthorized("Session expired or invalid"))
}
