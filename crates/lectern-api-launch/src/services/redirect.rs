//! Platform redirect construction for the OIDC third-party login flow.

use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::config::LaunchConfig;
use crate::error::{LaunchError, LaunchResult};
use crate::models::LoginParams;

/// A platform-bound authentication request, plus the per-request values a
/// session layer would persist for id_token validation.
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    /// Fully assembled authorization endpoint URL.
    pub url: String,
    /// Generated OIDC state value.
    pub state: String,
    /// Generated OIDC nonce.
    pub nonce: String,
}

/// Builds the OIDC authentication request that sends the browser back to
/// the platform's authorization endpoint.
#[derive(Debug, Clone)]
pub struct LoginRedirectService {
    client_id: String,
    authorize_url: String,
    redirect_url: String,
}

impl LoginRedirectService {
    #[must_use]
    pub fn new(config: &LaunchConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            authorize_url: config.platform_authorize_url.clone(),
            redirect_url: config.redirect_url.clone(),
        }
    }

    /// Build the authentication request URL for a normalized login
    /// initiation.
    ///
    /// `lti_message_hint` is forwarded only when the platform sent one;
    /// `target_link_uri` is consumed later in the launch and is not part
    /// of the authentication request.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Configuration` when the configured
    /// authorization endpoint is not a valid URL.
    #[instrument(skip(self))]
    pub fn build(&self, params: &LoginParams) -> LaunchResult<LoginRedirect> {
        let mut url = Url::parse(&self.authorize_url).map_err(|e| {
            LaunchError::Configuration(format!("Invalid platform authorization URL: {e}"))
        })?;

        let state = Uuid::new_v4().simple().to_string();
        let nonce = Uuid::new_v4().simple().to_string();

        url.query_pairs_mut()
            .append_pair("scope", "openid")
            .append_pair("response_type", "id_token")
            .append_pair("response_mode", "form_post")
            .append_pair("prompt", "none")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("login_hint", &params.login_hint)
            .append_pair("state", &state)
            .append_pair("nonce", &nonce);

        if !params.lti_message_hint.is_empty() {
            url.query_pairs_mut()
                .append_pair("lti_message_hint", &params.lti_message_hint);
        }

        Ok(LoginRedirect {
            url: url.to_string(),
            state,
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_service() -> LoginRedirectService {
        LoginRedirectService::new(&LaunchConfig {
            client_id: "client-42".to_string(),
            platform_authorize_url: "https://platform.example/oauth2/authorize".to_string(),
            redirect_url: "https://tool.example/launch".to_string(),
            key_identifier: "tool-key".to_string(),
        })
    }

    fn params_with_hint(hint: &str) -> LoginParams {
        LoginParams {
            target_link_uri: "https://tool.example/assignment/9".to_string(),
            login_hint: "user-7".to_string(),
            lti_message_hint: hint.to_string(),
        }
    }

    fn query_map(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_build_appends_oidc_parameters() {
        let redirect = test_service()
            .build(&params_with_hint("opaque-hint"))
            .unwrap();
        let query = query_map(&redirect.url);

        assert_eq!(query["scope"], "openid");
        assert_eq!(query["response_type"], "id_token");
        assert_eq!(query["response_mode"], "form_post");
        assert_eq!(query["prompt"], "none");
        assert_eq!(query["client_id"], "client-42");
        assert_eq!(query["redirect_uri"], "https://tool.example/launch");
        assert_eq!(query["login_hint"], "user-7");
        assert_eq!(query["lti_message_hint"], "opaque-hint");
        assert_eq!(query["state"], redirect.state);
        assert_eq!(query["nonce"], redirect.nonce);
    }

    #[test]
    fn test_build_omits_empty_message_hint() {
        let redirect = test_service().build(&params_with_hint("")).unwrap();
        let query = query_map(&redirect.url);
        assert!(!query.contains_key("lti_message_hint"));
    }

    #[test]
    fn test_build_does_not_forward_target_link_uri() {
        let redirect = test_service()
            .build(&params_with_hint("opaque-hint"))
            .unwrap();
        let query = query_map(&redirect.url);
        assert!(!query.contains_key("target_link_uri"));
    }

    #[test]
    fn test_build_targets_authorization_endpoint() {
        let redirect = test_service().build(&params_with_hint("")).unwrap();
        assert!(redirect
            .url
            .starts_with("https://platform.example/oauth2/authorize?"));
    }

    #[test]
    fn test_state_and_nonce_are_fresh_per_request() {
        let service = test_service();
        let first = service.build(&params_with_hint("")).unwrap();
        let second = service.build(&params_with_hint("")).unwrap();

        assert_ne!(first.state, second.state);
        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.state, first.nonce);
        assert_eq!(first.state.len(), 32);
        assert_eq!(first.nonce.len(), 32);
    }

    #[test]
    fn test_invalid_authorize_url_is_configuration_error() {
        let service = LoginRedirectService::new(&LaunchConfig {
            client_id: "client-42".to_string(),
            platform_authorize_url: "not a url".to_string(),
            redirect_url: "https://tool.example/launch".to_string(),
            key_identifier: "tool-key".to_string(),
        });
        let err = service.build(&params_with_hint("")).unwrap_err();
        assert!(matches!(err, LaunchError::Configuration(_)));
    }
}
