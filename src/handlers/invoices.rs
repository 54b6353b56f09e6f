use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::GatewayError;
use crate::middleware::auth::AuthenticatedClient;
use crate::router::GatewayState;
use crate::types::envelope::Envelope;

/// GET /api/v2/invoices — the authenticated client's invoices, newest first.
pub async fn list_invoices(
    State(state): State<GatewayState>,
    AuthenticatedClient(client_id): AuthenticatedClient,
) -> Result<impl IntoResponse, GatewayError> {
    let invoices = state.storage.invoices_for_client(client_id).await?;
    Ok(Envelope::success(json!({ "invoices": invoices })))
}

/// GET /api/v2/invoice/{id} — invoice detail with line items. Unlike the
/// client profile route, this one is scoped to the owner: someone else's
/// invoice id reads as absent.
pub async fn invoice_by_id(
    State(state): State<GatewayState>,
    AuthenticatedClient(client_id): AuthenticatedClient,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let invoice = state
        .storage
        .invoice_for_client(client_id, id)
        .await?
        .ok_or(GatewayError::NotFound("Invoice"))?;
    let items = state.storage.invoice_items(id).await?;

    Ok(Envelope::success(json!({
        "invoice": invoice,
        "items": items,
    })))
}
