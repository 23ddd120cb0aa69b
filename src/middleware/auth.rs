//! Request identity and the admin allow-list.
//!
//! [`resolve_identity`] runs once per request: it verifies the bearer token
//! with the configured [`IdentityVerifier`] and stores the result in the
//! request extensions. Handlers then ask for an [`Identity`] (401 when
//! absent) or an [`AdminUser`] (additionally checked against the single
//! [`AdminPolicy`]).

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,
}

/// Turns a bearer token issued by the identity provider into an [`Identity`].
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
}

/// HS256 tokens signed with a shared secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

impl IdentityVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let decoded = decode::<Claims>(token, &self.key, &self.validation)?;
        if decoded.claims.sub.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }
        Ok(Identity {
            user_id: decoded.claims.sub,
            email: decoded.claims.email,
        })
    }
}

/// Signs a token the [`JwtVerifier`] for `secret` accepts. Used by the seed
/// binary and by tests; production tokens come from the identity provider.
pub fn issue_token(
    secret: &str,
    sub: &str,
    email: Option<&str>,
    ttl: Duration,
) -> anyhow::Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow::anyhow!("Failed to set expiration"))?;
    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        exp: expiration.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Fixed set of admin email addresses, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    emails: HashSet<String>,
}

impl AdminPolicy {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        identity
            .email
            .as_deref()
            .map(|email| self.emails.contains(&email.trim().to_lowercase()))
            .unwrap_or(false)
    }

    pub fn ensure_admin(&self, identity: &Identity) -> Result<(), AppError> {
        if !self.is_admin(identity) {
            tracing::info!(user_id = %identity.user_id, "non-admin redirected away from admin route");
            return Err(AppError::NotAdmin);
        }
        Ok(())
    }
}

/// Identity resolved for the current request, `None` when anonymous.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<Identity>);

pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = bearer_token(request.headers()).and_then(|token| {
        match state.identity.verify(token) {
            Ok(identity) => Some(identity),
            Err(err) => {
                tracing::debug!(error = %err, "bearer token rejected");
                None
            }
        }
    });
    request.extensions_mut().insert(RequestIdentity(identity));
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .and_then(|resolved| resolved.0.clone())
            .ok_or(AppError::Unauthorized)
    }
}

/// An identity that passed the admin allow-list.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        state.admin_policy.ensure_admin(&identity)?;
        Ok(AdminUser(identity))
    }
}
