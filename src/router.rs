use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::db::PortalStorage;
use crate::handlers;
use crate::service::files::FileStore;

/// Uploads carry raw mobile camera output; everything else is small JSON.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Shared per-request state: the storage handle and the file store, both
/// constructed in `main` and injected here (no process-wide globals).
#[derive(Clone)]
pub struct GatewayState {
    pub storage: PortalStorage,
    pub files: FileStore,
}

impl GatewayState {
    pub fn new(storage: PortalStorage, files: FileStore) -> Self {
        Self { storage, files }
    }
}

/// Build the `/api/v2` route tree. The login route is the only public one;
/// every other handler takes the `AuthenticatedClient` extractor.
pub fn gateway_router(state: GatewayState) -> Router {
    // The mobile client calls cross-origin; mirror the permissive policy the
    // monolith's deployment already grants.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/api/v2/auth/login", post(handlers::auth::login))
        .route("/api/v2/clients", get(handlers::clients::list_clients))
        .route("/api/v2/client", get(handlers::clients::own_profile))
        .route("/api/v2/client/{id}", get(handlers::clients::profile_by_id))
        .route("/api/v2/invoices", get(handlers::invoices::list_invoices))
        .route("/api/v2/invoice/{id}", get(handlers::invoices::invoice_by_id))
        .route("/api/v2/upload-files", post(handlers::uploads::upload_files))
        .route(
            "/api/v2/delete-image/{id}",
            delete(handlers::uploads::delete_image),
        )
        .with_state(state)
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
