use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

use crate::error::GatewayError;
use crate::middleware::auth::AuthenticatedClient;
use crate::router::GatewayState;
use crate::service::files::valid_kind;
use crate::types::envelope::Envelope;

const DEFAULT_KIND: &str = "document";

/// POST /api/v2/upload-files — multipart form with repeated `files` parts and
/// an optional `type` field naming the storage subdirectory.
///
/// Files are buffered until the form is fully read, because `type` may arrive
/// after the file parts. The batch stops at the first failed write: files
/// saved before the failure stay on disk and in the database, matching the
/// reference behavior.
pub async fn upload_files(
    State(state): State<GatewayState>,
    AuthenticatedClient(client_id): AuthenticatedClient,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, GatewayError> {
    let mut kind: Option<String> = None;
    let mut pending: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| GatewayError::BadRequest("Invalid request".to_string()))?
    {
        // take the name by value before the field is consumed below
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| GatewayError::BadRequest("Invalid request".to_string()))?;
                kind = Some(value);
            }
            Some("files") => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| GatewayError::BadRequest("Invalid request".to_string()))?;
                pending.push((original_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let kind = kind.unwrap_or_else(|| DEFAULT_KIND.to_string());
    if !valid_kind(&kind) {
        return Err(GatewayError::BadRequest("Invalid file type".to_string()));
    }
    if pending.is_empty() {
        return Err(GatewayError::BadRequest("No files provided".to_string()));
    }

    let mut uploaded = Vec::with_capacity(pending.len());
    for (original_name, bytes) in pending {
        let saved = state.files.save(&kind, &original_name, &bytes).await?;
        let id = state
            .storage
            .insert_image(
                &saved.filename,
                &original_name,
                &kind,
                saved.size,
                &saved.path.to_string_lossy(),
            )
            .await?;

        uploaded.push(json!({
            "id": id,
            "filename": saved.filename,
            "url": format!("/storage/files/{kind}/{}", saved.filename),
            "type": kind,
            "original_name": original_name,
        }));
    }

    info!(client_id, count = uploaded.len(), kind, "files uploaded");
    Ok(Envelope::success_with_message(
        format!("{} files uploaded successfully", uploaded.len()),
        json!({ "files": uploaded }),
    ))
}

/// DELETE /api/v2/delete-image/{id} — removes the blob from disk, then the
/// row. A failed filesystem delete leaves the row in place.
pub async fn delete_image(
    State(state): State<GatewayState>,
    AuthenticatedClient(client_id): AuthenticatedClient,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, GatewayError> {
    let image = state
        .storage
        .image_by_id(id)
        .await?
        .ok_or(GatewayError::NotFound("Image"))?;

    state.files.remove(&image.path).await?;
    state.storage.delete_image(id).await?;

    info!(client_id, image_id = id, "image deleted");
    Ok(Envelope::success_with_message(
        "Image deleted successfully",
        json!({}),
    ))
}
