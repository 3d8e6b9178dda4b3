use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config;
use crate::query::Role;

/// Name of the session cookie set on login and cleared on logout.
pub const SESSION_COOKIE: &str = "donorbook_session";

/// Signed session claims: who is logged in, their role, and - for a
/// CenterAdmin - which center scopes every query they run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: Role,
    pub center_id: Option<i32>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(admin_id: i32, role: Role, center_id: Option<i32>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.session_expiry_hours;
        Self {
            sub: admin_id,
            role,
            center_id,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session token generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Session secret not configured")]
    MissingSecret,
}

pub fn generate_token(claims: &Claims) -> Result<String, SessionError> {
    let secret = &config::config().security.session_secret;
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| SessionError::TokenGeneration(e.to_string()))
}

pub fn decode_token(token: &str) -> Result<Claims, SessionError> {
    let secret = &config::config().security.session_secret;
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|_| SessionError::InvalidToken)?;
    Ok(data.claims)
}

/// Set-Cookie value establishing the session.
pub fn session_cookie(token: &str) -> String {
    let security = &config::config().security;
    let max_age = security.session_expiry_hours * 3600;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value clearing the session on logout.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Pull the session token out of a Cookie header value.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Hex sha256 digest for stored passwords. The legacy data kept passwords in
/// the clear; digests are computed on create/reset and compared on login.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_claims() {
        // Development config carries a default secret.
        let claims = Claims::new(7, Role::CenterAdmin, Some(3));
        let token = generate_token(&claims).unwrap();
        let decoded = decode_token(&token).unwrap();
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.role, Role::CenterAdmin);
        assert_eq!(decoded.center_id, Some(3));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let claims = Claims::new(1, Role::Admin, None);
        let mut token = generate_token(&claims).unwrap();
        token.push('x');
        assert!(decode_token(&token).is_err());
    }

    #[test]
    fn cookie_header_parsing_finds_session() {
        let header = format!("theme=dark; {}=abc.def.ghi; lang=en", SESSION_COOKIE);
        assert_eq!(token_from_cookie_header(&header).as_deref(), Some("abc.def.ghi"));
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header(&format!("{}=", SESSION_COOKIE)), None);
    }

    #[test]
    fn password_digests_verify() {
        let digest = hash_password("hunter2");
        assert_ne!(digest, "hunter2");
        assert!(verify_password("hunter2", &digest));
        assert!(!verify_password("hunter3", &digest));
    }
}
