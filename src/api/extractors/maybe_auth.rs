use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::auth::AuthenticatedUser;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{debug, Span};
use super::auth::{decode_access_token, ACCESS_TOKEN_COOKIE};

/// Never rejects: a missing or invalid token yields a guest.
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Some(cookies) = parts.extensions.get::<Cookies>() else {
            return Ok(MaybeAuthUser(None));
        };

        let access_token = match cookies.get(ACCESS_TOKEN_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return Ok(MaybeAuthUser(None)),
        };

        let claims = match decode_access_token(&access_token, &app_state.config) {
            Ok(claims) => claims,
            Err(e) => {
                // Expired or badly signed token -> guest
                debug!("MaybeAuth: treating caller as guest: {}", e);
                return Ok(MaybeAuthUser(None));
            }
        };

        let user = AuthenticatedUser::from(claims);
        Span::current().record("user_id", &user.id);

        Ok(MaybeAuthUser(Some(user)))
    }
}
