//! Session token codec.
//!
//! Tokens are opaque three-segment strings (`header.payload.trailer`) whose
//! payload is a base64url-encoded JSON object carrying the session claims.
//! Only structural and expiry validation is performed here; the trailer is
//! never verified cryptographically.

use crate::auth::model::{Role, Session};
use crate::error::{PumpMasterError, Result};
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TOKEN_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;
const TOKEN_TRAILER: &str = "fixture-signature";

/// Validated session claims carried in a token payload.
///
/// `user_id`, `email` and `role` are guaranteed present after [`decode`];
/// `name` stays optional and callers fall back to [`TokenClaims::display_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Expiry, epoch seconds
    pub exp: i64,
}

impl TokenClaims {
    /// The display name for these claims: the `name` claim when present,
    /// otherwise the local-part of the email (substring before `@`).
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }

    /// The expiry instant. The seconds value was range-checked at decode
    /// time, so the fallback is unreachable for decoded claims.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Builds the process session these claims describe.
    pub fn to_session(&self) -> Session {
        Session {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            name: self.display_name(),
            role: self.role,
            permissions: self.permissions.iter().cloned().collect(),
            expires_at: self.expires_at(),
        }
    }
}

/// Raw payload shape before required-claim validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    user_id: Option<String>,
    email: Option<String>,
    role: Option<String>,
    name: Option<String>,
    #[serde(default)]
    permissions: Vec<String>,
    iat: Option<i64>,
    exp: Option<i64>,
}

/// Encodes claims into the three-segment token form.
pub fn encode(claims: &TokenClaims) -> Result<String> {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(TOKEN_HEADER.as_bytes());
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    Ok(format!("{header}.{payload}.{TOKEN_TRAILER}"))
}

/// Decodes and validates a persisted token.
///
/// Validation order matters and is part of the contract:
///
/// 1. Structure: three dot-separated segments, base64url payload, JSON body.
///    Failures are [`PumpMasterError::MalformedToken`].
/// 2. Expiry: a missing `exp` is [`PumpMasterError::MissingTokenClaim`];
///    `exp * 1000 < now_ms` is [`PumpMasterError::ExpiredToken`].
/// 3. Required claims: `user_id`, `email`, `role` must be present and
///    non-empty, otherwise [`PumpMasterError::MissingTokenClaim`] even
///    though the token is not expired.
pub fn decode(token: &str) -> Result<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(PumpMasterError::malformed_token(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| PumpMasterError::malformed_token(format!("payload is not base64url: {e}")))?;

    let raw: RawClaims = serde_json::from_slice(&payload)
        .map_err(|e| PumpMasterError::malformed_token(format!("payload is not valid JSON: {e}")))?;

    let exp = raw.exp.ok_or(PumpMasterError::missing_claim("exp"))?;
    let exp_ms = exp
        .checked_mul(1000)
        .ok_or_else(|| PumpMasterError::malformed_token("exp out of range"))?;
    if DateTime::<Utc>::from_timestamp(exp, 0).is_none() {
        return Err(PumpMasterError::malformed_token("exp out of range"));
    }
    if exp_ms < Utc::now().timestamp_millis() {
        return Err(PumpMasterError::ExpiredToken);
    }

    let user_id = require(raw.user_id, "userId")?;
    let email = require(raw.email, "email")?;
    let role_str = require(raw.role, "role")?;
    let role: Role = role_str
        .parse()
        .map_err(|_| PumpMasterError::malformed_token(format!("unrecognized role '{role_str}'")))?;

    Ok(TokenClaims {
        user_id,
        email,
        role,
        name: raw.name,
        permissions: raw.permissions,
        iat: raw.iat.unwrap_or(0),
        exp,
    })
}

/// Empty strings count as absent, matching the lenient producers this
/// console restores tokens from.
fn require(claim: Option<String>, name: &'static str) -> Result<String> {
    match claim {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PumpMasterError::missing_claim(name)),
    }
}
