//! Login initiation handlers.
//!
//! Both verbs accept the initiation: the parameter source is decided by
//! the request's content type inside the extractor, not by the verb.

use axum::extract::State;
use axum::response::Redirect;

use crate::error::LaunchError;
use crate::extractors::LoginInitiation;
use crate::models::LoginParams;
use crate::router::LaunchState;

/// Start an LTI 1.3 third-party-initiated login (query binding).
#[utoipa::path(
    get,
    path = "/login",
    params(
        ("target_link_uri" = Option<String>, Query, description = "Launch destination inside the tool"),
        ("login_hint" = Option<String>, Query, description = "Opaque platform user hint"),
        ("lti_message_hint" = Option<String>, Query, description = "Opaque platform state hint"),
    ),
    responses(
        (status = 307, description = "Redirect to the platform authorization endpoint"),
        (status = 400, description = "Malformed login request", body = ErrorResponse),
        (status = 500, description = "Service misconfigured", body = ErrorResponse),
    ),
    tag = "LTI"
)]
pub async fn login_get(
    State(state): State<LaunchState>,
    LoginInitiation(params): LoginInitiation,
) -> Result<Redirect, LaunchError> {
    handle_login(&state, &params)
}

/// Start an LTI 1.3 third-party-initiated login (form binding).
#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 307, description = "Redirect to the platform authorization endpoint"),
        (status = 400, description = "Malformed login request", body = ErrorResponse),
        (status = 500, description = "Service misconfigured", body = ErrorResponse),
    ),
    tag = "LTI"
)]
pub async fn login_post(
    State(state): State<LaunchState>,
    LoginInitiation(params): LoginInitiation,
) -> Result<Redirect, LaunchError> {
    handle_login(&state, &params)
}

fn handle_login(state: &LaunchState, params: &LoginParams) -> Result<Redirect, LaunchError> {
    if params.target_link_uri.is_empty() || params.login_hint.is_empty() {
        tracing::warn!(
            target_link_uri = %params.target_link_uri,
            login_hint = %params.login_hint,
            "Login initiation is missing protocol-required fields"
        );
    }

    let redirect = state.redirect_service.build(params)?;

    tracing::info!(
        target_link_uri = %params.target_link_uri,
        login_hint = %params.login_hint,
        state = %redirect.state,
        "Login initiation normalized, redirecting to platform"
    );

    Ok(Redirect::temporary(&redirect.url))
}
