use std::time::Duration;

/// Identity that unlocks the privileged navigation entry.
/// Set `CMS_PRIVILEGED_IDENTITY` at build time to override.
pub const PRIVILEGED_IDENTITY: &str = match option_env!("CMS_PRIVILEGED_IDENTITY") {
    Some(identity) => identity,
    None => "slidespr@gmail.com",
};

pub const SESSION_EXPIRED_NOTICE: &str = "Session expired due to inactivity.";

pub const DEFAULT_STORAGE_KEY: &str = "token";
pub const DEFAULT_LOGIN_PATH: &str = "/cms/login";
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(45 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Name of the credential entry in the store.
    pub storage_key: String,
    pub login_path: String,
    pub idle_timeout: Duration,
    pub privileged_identity: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            privileged_identity: PRIVILEGED_IDENTITY.to_string(),
        }
    }
}
