//! Public key endpoint.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::error::LaunchError;
use crate::router::LaunchState;

/// Export the tool's RSA public key as PEM.
///
/// Platforms register this key to verify messages signed by the tool. The
/// material is resolved fresh from the key source on every request.
#[utoipa::path(
    get,
    path = "/keys",
    responses(
        (status = 200, description = "PEM-encoded RSA public key", content_type = "application/x-pem-file"),
        (status = 503, description = "Key source unavailable", body = ErrorResponse),
    ),
    tag = "LTI"
)]
pub async fn public_key(
    State(state): State<LaunchState>,
) -> Result<impl IntoResponse, LaunchError> {
    let pem = state.exporter.export(&state.key_identifier).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-pem-file")],
        pem,
    ))
}
