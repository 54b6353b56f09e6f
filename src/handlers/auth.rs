use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::GatewayError;
use crate::router::GatewayState;
use crate::service;
use crate::types::envelope::Envelope;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
    /// Accepted for the mobile client's benefit; logged but not stored.
    #[serde(default)]
    pub device_name: Option<String>,
}

/// POST /api/v2/auth/login
pub async fn login(
    State(state): State<GatewayState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) =
        payload.map_err(|_| GatewayError::BadRequest("Invalid request data".to_string()))?;
    if req.identifier.is_empty() || req.password.is_empty() {
        return Err(GatewayError::BadRequest(
            "identifier and password are required".to_string(),
        ));
    }

    let grant = service::auth::authenticate(&state.storage, &req.identifier, &req.password).await?;
    info!(
        client_id = grant.client.id,
        device = req.device_name.as_deref().unwrap_or("<none>"),
        "client logged in"
    );

    let client = &grant.client;
    Ok(Envelope::success_with_message(
        "Login successful",
        json!({
            "token": grant.token,
            "expires_at": grant.expires_at.to_rfc3339(),
            "client": {
                "id": client.id,
                "name": client.display_name(),
                "email": client.email,
                "phone": client.phonenumber,
                "address": client.address1,
                "status": client.status,
            },
        }),
    ))
}
