use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::GatewayError;
use crate::router::GatewayState;
use crate::service;

/// Extractor guarding protected routes: resolves the `Authorization` header
/// to the authenticated client id before the handler body runs, so a failed
/// validation performs no further side effects.
///
/// Note the carried id only proves the caller holds *a* valid token; handlers
/// taking a client id path parameter do not cross-check it (see DESIGN.md).
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedClient(pub i64);

impl FromRequestParts<GatewayState> for AuthenticatedClient {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let client_id = service::auth::validate_bearer(&state.storage, header).await?;
        Ok(Self(client_id))
    }
}
