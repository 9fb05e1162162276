//! # Authentication
//!
//! Bearer tokens issued by the identity layer in front of us: a base64url
//! JSON claims blob plus an HMAC-SHA256 signature over it, joined with a
//! dot. The server only verifies; signing lives here too so tests and the
//! seeder can mint tokens.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use openhouse_domain::{Actor, Role};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{error::AppError, state::State};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Unix seconds.
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenKey {
    secret: Vec<u8>,
}

impl TokenKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn sign(&self, claims: &Claims) -> String {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("claims are json"));
        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("hmac accepts any key length");
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{payload}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Option<Claims> {
        let (payload, signature) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret).expect("hmac accepts any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let claims: Claims = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
        if claims.exp <= Utc::now().timestamp() {
            return None;
        }
        Some(claims)
    }
}

/// The authenticated caller. Extraction fails with 401; role checks are up
/// to the handlers.
pub struct CurrentUser {
    pub actor: Actor,
    pub display_name: String,
}

impl FromRequestParts<Arc<State>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<State>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth.verify(token).ok_or(AppError::Unauthorized)?;

        // Unknown role strings are ignored rather than rejected so new roles
        // can roll out before this service learns about them.
        let roles = claims.roles.iter().filter_map(|v| Role::parse(v)).collect();

        Ok(CurrentUser {
            actor: Actor::new(claims.sub, roles),
            display_name: claims.name,
        })
    }
}
