//! Authentication extractors.
//!
//! Handlers declare the identity they need in their signature instead of
//! consulting any global session state: [`RequireUser`] resolves the
//! request's session token into a [`CurrentUser`], and [`RequireAdmin`]
//! additionally checks the role.
//!
//! The token is read from `Authorization: Bearer <token>` or, failing that,
//! from a `session` cookie.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use crate::db::SessionRepository;
use crate::error::{self, AppError};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor that requires a valid session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Extractor that requires a valid session with the ADMIN role.
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = session_token(&parts.headers).ok_or(AppError::Unauthenticated)?;

        let user = SessionRepository::new(state.pool())
            .find_current_user(token)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        // Associate any later errors on this request with the caller.
        error::set_sentry_user(&user.id, Some(user.email.as_str()));

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        Ok(Self(user))
    }
}

/// Extract the session token from the request headers.
fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    bearer_token(headers)
        .or_else(|| cookie_token(headers))
        .and_then(|raw| Uuid::parse_str(&raw).ok())
}

/// Token from an `Authorization: Bearer` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_owned())
}

/// Token from a `session` cookie.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("session="))
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = Uuid::new_v4();
        let map = headers(header::AUTHORIZATION, &format!("Bearer {token}"));
        assert_eq!(session_token(&map), Some(token));
    }

    #[test]
    fn cookie_token_is_extracted() {
        let token = Uuid::new_v4();
        let map = headers(header::COOKIE, &format!("theme=dark; session={token}"));
        assert_eq!(session_token(&map), Some(token));
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let bearer = Uuid::new_v4();
        let cookie = Uuid::new_v4();
        let mut map = headers(header::AUTHORIZATION, &format!("Bearer {bearer}"));
        map.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("session={cookie}")).unwrap(),
        );
        assert_eq!(session_token(&map), Some(bearer));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(session_token(&HeaderMap::new()), None);

        let map = headers(header::AUTHORIZATION, "Bearer not-a-uuid");
        assert_eq!(session_token(&map), None);

        let map = headers(header::AUTHORIZATION, "Basic dXNlcjpwdw==");
        assert_eq!(session_token(&map), None);
    }
}
