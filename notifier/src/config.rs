use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable carrying the EmailJS service id.
pub const SERVICE_ID_VAR: &str = "EMAILJS_SERVICE_ID";
/// Environment variable carrying the EmailJS template id.
pub const TEMPLATE_ID_VAR: &str = "EMAILJS_TEMPLATE_ID";
/// Environment variable carrying the EmailJS account public key.
pub const PUBLIC_KEY_VAR: &str = "EMAILJS_PUBLIC_KEY";
/// Environment variable carrying the sales recipient address.
pub const RECIPIENT_VAR: &str = "ROI_RECIPIENT_EMAIL";

/// Errors raised while assembling transport configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),
}

/// Opaque identifiers for the external send-mail service.
///
/// Externally supplied configuration, never hard-coded: the ids mean
/// nothing to this system beyond being handed to the transport verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJsConfig {
    /// Service id registered with the provider.
    pub service_id: String,
    /// Template id describing the outgoing message layout.
    pub template_id: String,
    /// Account public key used to authorize the send.
    pub public_key: String,
    /// Sales contact receiving every submission.
    pub to_email: String,
}

impl EmailJsConfig {
    /// Builds a configuration, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first blank setting.
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
        to_email: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            to_email: to_email.into(),
        };
        config.validated()
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first unset or blank
    /// variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            service_id: require(SERVICE_ID_VAR)?,
            template_id: require(TEMPLATE_ID_VAR)?,
            public_key: require(PUBLIC_KEY_VAR)?,
            to_email: require(RECIPIENT_VAR)?,
        })
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.service_id.trim().is_empty() {
            return Err(ConfigError::Missing("service_id"));
        }
        if self.template_id.trim().is_empty() {
            return Err(ConfigError::Missing("template_id"));
        }
        if self.public_key.trim().is_empty() {
            return Err(ConfigError::Missing("public_key"));
        }
        if self.to_email.trim().is_empty() {
            return Err(ConfigError::Missing("to_email"));
        }
        Ok(self)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_configuration() {
        let config =
            EmailJsConfig::new("service_x", "template_y", "key_z", "ventas@example.com").unwrap();
        assert_eq!(config.service_id, "service_x");
        assert_eq!(config.to_email, "ventas@example.com");
    }

    #[test]
    fn rejects_first_blank_setting() {
        let err = EmailJsConfig::new("", "", "", "").unwrap_err();
        assert_eq!(err, ConfigError::Missing("service_id"));

        let err = EmailJsConfig::new("s", "t", "  ", "a@b.com").unwrap_err();
        assert_eq!(err, ConfigError::Missing("public_key"));
    }
}
