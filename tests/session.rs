use anyhow::Result;
use donorbook_api::auth::{
    self, clear_session_cookie, decode_token, generate_token, session_cookie, Claims,
    SESSION_COOKIE,
};
use donorbook_api::middleware::AuthSession;
use donorbook_api::query::{AccessScope, Role};

#[test]
fn login_token_survives_the_cookie_round_trip() -> Result<()> {
    let claims = Claims::new(42, Role::CenterAdmin, Some(6));
    let token = generate_token(&claims)?;

    // Set-Cookie on login, Cookie header on the next request.
    let set_cookie = session_cookie(&token);
    assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie_header = format!("theme=dark; {}={}", SESSION_COOKIE, token);
    let extracted = auth::token_from_cookie_header(&cookie_header)
        .ok_or_else(|| anyhow::anyhow!("cookie not found"))?;
    let decoded = decode_token(&extracted)?;

    assert_eq!(decoded.sub, 42);
    assert_eq!(decoded.role, Role::CenterAdmin);
    assert_eq!(decoded.center_id, Some(6));
    Ok(())
}

#[test]
fn session_scope_follows_the_signed_role() -> Result<()> {
    let admin: AuthSession = Claims::new(1, Role::Admin, None).into();
    assert_eq!(admin.scope(), AccessScope::Global);

    let center_admin: AuthSession = Claims::new(2, Role::CenterAdmin, Some(9)).into();
    assert_eq!(center_admin.scope(), AccessScope::Center(9));

    // A CenterAdmin row that lost its center assignment must not widen to
    // global visibility.
    let orphaned: AuthSession = Claims::new(3, Role::CenterAdmin, None).into();
    assert_eq!(orphaned.scope(), AccessScope::Center(0));
    Ok(())
}

#[test]
fn logout_cookie_expires_the_session() {
    let cleared = clear_session_cookie();
    assert!(cleared.starts_with(&format!("{}=;", SESSION_COOKIE)));
    assert!(cleared.contains("Max-Age=0"));
}

#[test]
fn forged_tokens_do_not_authenticate() -> Result<()> {
    let claims = Claims::new(1, Role::Admin, None);
    let token = generate_token(&claims)?;

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3);
    parts[2] = "forgedsignature".to_string();
    assert!(decode_token(&parts.join(".")).is_err());
    Ok(())
}
