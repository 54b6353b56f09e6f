use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::{Value, json};

use crate::db::models::Client;
use crate::error::GatewayError;
use crate::middleware::auth::AuthenticatedClient;
use crate::router::GatewayState;
use crate::types::envelope::Envelope;

/// GET /api/v2/clients — first 50 accounts, summary columns only.
pub async fn list_clients(
    State(state): State<GatewayState>,
    AuthenticatedClient(_): AuthenticatedClient,
) -> Result<impl IntoResponse, GatewayError> {
    let clients = state.storage.list_clients().await?;
    Ok(Envelope::success(json!({ "clients": clients })))
}

/// GET /api/v2/client — profile of the authenticated client.
pub async fn own_profile(
    State(state): State<GatewayState>,
    AuthenticatedClient(client_id): AuthenticatedClient,
) -> Result<impl IntoResponse, GatewayError> {
    fetch_profile(&state, client_id).await
}

/// GET /api/v2/client/{id} — profile of an arbitrary client. Only requires a
/// valid token for *some* account; no ownership check (preserved legacy
/// behavior, see DESIGN.md).
pub async fn profile_by_id(
    State(state): State<GatewayState>,
    AuthenticatedClient(_): AuthenticatedClient,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    fetch_profile(&state, id).await
}

async fn fetch_profile(
    state: &GatewayState,
    client_id: i64,
) -> Result<Json<Envelope<Value>>, GatewayError> {
    let client = state
        .storage
        .client_by_id(client_id)
        .await?
        .ok_or(GatewayError::NotFound("Client"))?;

    Ok(Envelope::success(json!({ "client": profile_json(&client) })))
}

/// The account-page projection. Never includes the password hash.
fn profile_json(client: &Client) -> Value {
    json!({
        "id": client.id,
        "firstname": client.firstname,
        "lastname": client.lastname,
        "email": client.email,
        "address1": client.address1,
        "address2": client.address2,
        "city": client.city,
        "state": client.state,
        "postcode": client.postcode,
        "country": client.country,
        "phonenumber": client.phonenumber,
        "company": client.companyname,
        "status": client.status,
        "created_at": client.datecreated,
    })
}
