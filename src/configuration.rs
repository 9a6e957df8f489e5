use jsonwebtoken::Algorithm;
use std::fmt;

#[derive(Debug, serde::Deserialize, Clone)]
pub struct Settings {
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    pub privileged_identity: String,
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

// The secret never reaches the logs, even through #[tracing::instrument]
impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .field("privileged_identity", &self.privileged_identity)
            .finish()
    }
}

impl AuthSettings {
    /// Shared-secret verification only works with the HMAC family.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(config::ConfigError::Message(format!(
                "auth.algorithm {:?} is not a shared-secret algorithm",
                self.algorithm
            )));
        }
        if self.privileged_identity.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "auth.privileged_identity must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` first, then CMS__AUTH__JWT_SECRET style overrides
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(config::Environment::with_prefix("CMS").separator("__"))
        .build()?;

    let config: Settings = settings.try_deserialize()?;
    config.auth.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_settings(algorithm: Algorithm) -> AuthSettings {
        AuthSettings {
            jwt_secret: "super-secret".to_string(),
            algorithm,
            privileged_identity: "slidespr@gmail.com".to_string(),
        }
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", auth_settings(Algorithm::HS256));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("slidespr@gmail.com"));
    }

    #[test]
    fn asymmetric_algorithms_are_rejected() {
        assert!(auth_settings(Algorithm::HS512).validate().is_ok());
        assert!(auth_settings(Algorithm::RS256).validate().is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut settings = auth_settings(Algorithm::HS256);
        settings.jwt_secret = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn algorithm_defaults_to_hs256() {
        let settings: AuthSettings = serde_json::from_value(serde_json::json!({
            "jwt_secret": "s",
            "privileged_identity": "slidespr@gmail.com",
        }))
        .expect("settings should deserialize");
        assert_eq!(settings.algorithm, Algorithm::HS256);
    }
}
