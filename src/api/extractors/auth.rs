use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, Method, StatusCode},
};
use crate::state::AppState;
use crate::config::Config;
use crate::domain::models::auth::{AuthenticatedUser, Claims};
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, errors::Error as JwtError, DecodingKey, Validation, Algorithm};
use tracing::{debug, Span};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Verifies an EdDSA access token against the configured public key and audience.
pub fn decode_access_token(token: &str, config: &Config) -> Result<Claims, JwtError> {
    let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_audience(&[config.auth_audience.as_str()]);

    Ok(decode::<Claims>(token, &decoding_key, &validation)?.claims)
}

pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let access_token = cookies.get(ACCESS_TOKEN_COOKIE)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = decode_access_token(&access_token, &app_state.config)
            .map_err(|e| {
                debug!("Rejected access token: {}", e);
                StatusCode::UNAUTHORIZED
            })?;

        let method = &parts.method;
        if method != Method::GET && method != Method::HEAD && method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .ok_or(StatusCode::FORBIDDEN)?
                .to_str()
                .map_err(|_| StatusCode::FORBIDDEN)?;

            if csrf_header_val != claims.csrf_token {
                return Err(StatusCode::FORBIDDEN);
            }
        }

        let user = AuthenticatedUser::from(claims);
        Span::current().record("user_id", &user.id);

        Ok(AuthUser(user))
    }
}

/// Signed-in caller with an `admin` or `super_admin` role.
pub struct AdminUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(StatusCode::FORBIDDEN);
        }

        Ok(AdminUser(user))
    }
}
