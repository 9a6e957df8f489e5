use crate::session::{peek_unverified_claims, ClientSettings, CredentialStore, SessionHost};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
}

pub const DASHBOARD_ENTRIES: [NavEntry; 5] = [
    NavEntry { label: "Dashboard", path: "/cms" },
    NavEntry { label: "Projects", path: "/cms/projects" },
    NavEntry { label: "Publications", path: "/cms/publications" },
    NavEntry { label: "Reports", path: "/cms/reports" },
    NavEntry { label: "Stations", path: "/cms/stations" },
];

pub const PRIVILEGED_ENTRY: NavEntry = NavEntry {
    label: "Admin",
    path: "/cms/admin",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub entries: Vec<NavEntry>,
}

impl Navigation {
    pub fn has_entry(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    pub fn is_privileged(&self) -> bool {
        self.has_entry(PRIVILEGED_ENTRY.path)
    }
}

/// Dashboard navigation bar.
///
/// The privileged entry is cosmetic: it is chosen from an unverified peek
/// of the stored credential and grants nothing by itself.
pub struct NavigationRenderer {
    settings: ClientSettings,
    store: Arc<dyn CredentialStore>,
    host: Arc<dyn SessionHost>,
}

impl NavigationRenderer {
    pub fn new(
        settings: ClientSettings,
        store: Arc<dyn CredentialStore>,
        host: Arc<dyn SessionHost>,
    ) -> Self {
        Self {
            settings,
            store,
            host,
        }
    }

    /// Never fails: anything unreadable renders the unprivileged bar.
    pub fn render(&self) -> Navigation {
        let mut entries = DASHBOARD_ENTRIES.to_vec();
        if self.peeked_email().as_deref() == Some(self.settings.privileged_identity.as_str()) {
            entries.push(PRIVILEGED_ENTRY);
        }
        Navigation { entries }
    }

    fn peeked_email(&self) -> Option<String> {
        let token = match self.store.get(&self.settings.storage_key) {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("credential store unreadable while rendering navigation: {}", err);
                return None;
            }
        };

        match peek_unverified_claims(&token) {
            Ok(claims) => Some(claims.email),
            Err(err) => {
                tracing::debug!("stored credential could not be decoded: {}", err);
                None
            }
        }
    }

    /// Erases the stored credential and sends the host to the login view.
    pub fn logout(&self) {
        if let Err(err) = self.store.remove(&self.settings.storage_key) {
            tracing::error!("failed to erase the stored credential on logout: {}", err);
        }
        tracing::info!("logged out");
        self.host.navigate(&self.settings.login_path);
    }
}
