//! Embedded-app session verification.
//!
//! Handlers take a [`ShopSession`] argument; there is no ambient "current
//! shop". The session is built per request from the App Bridge session token
//! in the `Authorization` header, and every remote call receives it
//! explicitly.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// A verified caller identity: which shop, and the credential to act on its
/// behalf.
#[derive(Debug, Clone)]
pub struct ShopSession {
    shop: String,
    access_token: String,
}

impl ShopSession {
    pub fn new(shop: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            access_token: access_token.into(),
        }
    }

    pub fn shop(&self) -> &str {
        &self.shop
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionClaims {
    /// Shop origin, e.g. `https://example.myshopify.com`.
    pub dest: String,
    #[allow(dead_code)]
    pub exp: usize,
}

/// Verify an App Bridge session token: HS256 signature against the app
/// secret, audience = the app's API key, expiry enforced.
pub fn verify_session_token(
    token: &str,
    api_key: &str,
    api_secret: &str,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[api_key]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(api_secret.as_bytes()),
        &validation,
    )
    .map_err(|err| AppError::Unauthenticated(format!("invalid session token: {err}")))?;

    Ok(data.claims)
}

fn shop_from_dest(dest: &str) -> &str {
    dest.trim_start_matches("https://").trim_end_matches('/')
}

impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthenticated("missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthenticated("Authorization header is not a bearer token".to_string())
        })?;

        let claims =
            verify_session_token(token, &state.config.api_key, &state.config.api_secret)?;

        let shop = shop_from_dest(&claims.dest);
        if shop != state.config.shop_domain {
            return Err(AppError::Unauthenticated(format!(
                "session token issued for unknown shop {shop}"
            )));
        }

        Ok(ShopSession::new(
            shop,
            state.config.admin_access_token.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct TestClaims {
        dest: String,
        aud: String,
        exp: usize,
    }

    fn issue(dest: &str, aud: &str, secret: &str) -> String {
        let claims = TestClaims {
            dest: dest.to_string(),
            aud: aud.to_string(),
            exp: (chrono::Utc::now().timestamp() + 600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_shop_claims() {
        let token = issue("https://example.myshopify.com", "key123", "secret");
        let claims = verify_session_token(&token, "key123", "secret").unwrap();
        assert_eq!(shop_from_dest(&claims.dest), "example.myshopify.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("https://example.myshopify.com", "key123", "other-secret");
        assert!(verify_session_token(&token, "key123", "secret").is_err());
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let token = issue("https://example.myshopify.com", "someone-else", "secret");
        assert!(verify_session_token(&token, "key123", "secret").is_err());
    }
}
