//! Authenticator and token validator.
//!
//! Sessions are opaque bearer tokens held in `api_tokens`, one live token per
//! client (a re-login overwrites the previous row). Expiry is set 100 years
//! out: a deliberate non-expiring-session policy inherited from the portal,
//! not an oversight — there is no renewal, rotation, or revocation.

use chrono::{DateTime, Months, Utc};
use rand::RngCore;
use tracing::debug;

use crate::db::PortalStorage;
use crate::db::models::Client;
use crate::error::GatewayError;

/// Token byte length before hex encoding (30 bytes = 60 hex chars, matching
/// the portal's 60-character tokens).
const TOKEN_BYTES: usize = 30;

/// Fixed session lifetime. See module docs.
const TOKEN_LIFETIME_YEARS: u32 = 100;

/// The result of a successful login.
#[derive(Debug)]
pub struct LoginGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub client: Client,
}

/// Verify identifier + password and mint a session token.
///
/// An identifier containing `@` is looked up as an email; anything else must
/// parse as a numeric client id. The two modes never fall back to each other.
/// Unknown account, wrong password, and an unparsable identifier all yield
/// the same `InvalidCredentials`.
pub async fn authenticate(
    storage: &PortalStorage,
    identifier: &str,
    password: &str,
) -> Result<LoginGrant, GatewayError> {
    let client = if identifier.contains('@') {
        storage.client_by_email(identifier).await?
    } else {
        match identifier.parse::<i64>() {
            Ok(id) => storage.client_by_id(id).await?,
            Err(_) => None,
        }
    }
    .ok_or(GatewayError::InvalidCredentials)?;

    // bcrypt::verify compares digests in constant time. A malformed stored
    // hash counts as a mismatch rather than an internal error.
    let password_ok = bcrypt::verify(password, &client.password).unwrap_or(false);
    if !password_ok {
        return Err(GatewayError::InvalidCredentials);
    }

    let token = generate_token();
    let created_at = Utc::now();
    let expires_at = created_at + Months::new(12 * TOKEN_LIFETIME_YEARS);

    storage
        .upsert_token(client.id, &token, created_at, expires_at)
        .await?;
    debug!(client_id = client.id, "session token issued");

    Ok(LoginGrant {
        token,
        expires_at,
        client,
    })
}

/// Resolve a raw `Authorization` header value to a client id.
///
/// Empty header → `MissingToken`. Token absent from the store, or present
/// with `expires_at` at or before now → `InvalidOrExpiredToken`.
pub async fn validate_bearer(
    storage: &PortalStorage,
    header: &str,
) -> Result<i64, GatewayError> {
    if header.is_empty() {
        return Err(GatewayError::MissingToken);
    }

    let token = strip_bearer(header);
    let record = storage
        .find_token(token)
        .await?
        .ok_or(GatewayError::InvalidOrExpiredToken)?;

    if record.expires_at <= Utc::now() {
        return Err(GatewayError::InvalidOrExpiredToken);
    }
    Ok(record.client_id)
}

/// Strip a literal `"Bearer "` prefix if present; otherwise the whole header
/// value is treated as the token. The leniency is legacy behavior the mobile
/// client relies on (see DESIGN.md open questions).
fn strip_bearer(header: &str) -> &str {
    header.strip_prefix("Bearer ").unwrap_or(header)
}

/// 30 bytes from the OS CSPRNG, hex-encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
