//! Launch configuration from environment variables.

use crate::error::{LaunchError, LaunchResult};

/// Tool-side LTI launch configuration.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Client id issued to the tool by the platform.
    pub client_id: String,
    /// Platform OIDC authorization endpoint.
    pub platform_authorize_url: String,
    /// Tool redirect URI registered with the platform.
    pub redirect_url: String,
    /// Identifier of the tool key in the key source.
    pub key_identifier: String,
}

impl LaunchConfig {
    /// Read configuration from `LTI_CLIENT_ID`, `LTI_PLATFORM_AUTHORIZE_URL`,
    /// `LTI_REDIRECT_URL` and `LTI_KEY_IDENTIFIER`.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Configuration` naming the first missing or
    /// empty variable.
    pub fn from_env() -> LaunchResult<Self> {
        Ok(Self {
            client_id: require_var("LTI_CLIENT_ID")?,
            platform_authorize_url: require_var("LTI_PLATFORM_AUTHORIZE_URL")?,
            redirect_url: require_var("LTI_REDIRECT_URL")?,
            key_identifier: require_var("LTI_KEY_IDENTIFIER")?,
        })
    }
}

fn require_var(name: &str) -> LaunchResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(LaunchError::Configuration(format!("{name} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test to keep the process-global environment mutations ordered.
    #[test]
    fn test_from_env() {
        std::env::set_var("LTI_CLIENT_ID", "client-42");
        std::env::set_var(
            "LTI_PLATFORM_AUTHORIZE_URL",
            "https://platform.example/oauth2/authorize",
        );
        std::env::set_var("LTI_REDIRECT_URL", "https://tool.example/launch");
        std::env::set_var("LTI_KEY_IDENTIFIER", "tool-key");

        let config = LaunchConfig::from_env().unwrap();
        assert_eq!(config.client_id, "client-42");
        assert_eq!(
            config.platform_authorize_url,
            "https://platform.example/oauth2/authorize"
        );
        assert_eq!(config.redirect_url, "https://tool.example/launch");
        assert_eq!(config.key_identifier, "tool-key");

        std::env::set_var("LTI_CLIENT_ID", "");
        let err = LaunchConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("LTI_CLIENT_ID"));

        std::env::remove_var("LTI_REDIRECT_URL");
        std::env::set_var("LTI_CLIENT_ID", "client-42");
        let err = LaunchConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("LTI_REDIRECT_URL"));

        std::env::remove_var("LTI_CLIENT_ID");
        std::env::remove_var("LTI_PLATFORM_AUTHORIZE_URL");
        std::env::remove_var("LTI_KEY_IDENTIFIER");
    }
}
