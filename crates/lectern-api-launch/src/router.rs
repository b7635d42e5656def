//! Launch API router.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use lectern_keys::PublicKeyExporter;

use crate::handlers::{login_get, login_post, public_key};
use crate::services::LoginRedirectService;

/// Shared state for the launch endpoints.
#[derive(Clone)]
pub struct LaunchState {
    pub redirect_service: Arc<LoginRedirectService>,
    pub exporter: Arc<PublicKeyExporter>,
    /// Identifier of the tool key in the key source.
    pub key_identifier: String,
}

impl LaunchState {
    #[must_use]
    pub fn new(
        redirect_service: Arc<LoginRedirectService>,
        exporter: Arc<PublicKeyExporter>,
        key_identifier: impl Into<String>,
    ) -> Self {
        Self {
            redirect_service,
            exporter,
            key_identifier: key_identifier.into(),
        }
    }
}

/// Build the launch router: login initiation plus public key export.
pub fn launch_router(state: LaunchState) -> Router {
    Router::new()
        .route("/login", get(login_get).post(login_post))
        .route("/keys", get(public_key))
        .with_state(state)
}
