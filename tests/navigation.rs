mod common;

use cms_auth::session::{
    ClientSettings, CredentialStore, MemoryStore, NavigationRenderer, DASHBOARD_ENTRIES,
    PRIVILEGED_ENTRY,
};
use common::RecordingHost;
use serde_json::json;
use std::sync::Arc;

fn renderer_with(token: Option<&str>) -> (NavigationRenderer, Arc<MemoryStore>, Arc<RecordingHost>) {
    let settings = ClientSettings::default();
    let store = Arc::new(match token {
        Some(token) => MemoryStore::with_entry(&settings.storage_key, token),
        None => MemoryStore::new(),
    });
    let host = Arc::new(RecordingHost::default());
    let renderer = NavigationRenderer::new(settings, store.clone(), host.clone());
    (renderer, store, host)
}

#[test]
fn privileged_email_shows_admin_entry() {
    let token = common::unsigned_token(json!({"sub": "1", "email": "slidespr@gmail.com"}));
    let (renderer, _, _) = renderer_with(Some(&token));

    let navigation = renderer.render();

    assert!(navigation.is_privileged());
    assert_eq!(navigation.entries.last(), Some(&PRIVILEGED_ENTRY));
    assert_eq!(navigation.entries.len(), DASHBOARD_ENTRIES.len() + 1);
}

#[test]
fn other_email_hides_admin_entry() {
    for email in ["regular@user.com", "SLIDESPR@gmail.com", " slidespr@gmail.com"] {
        let token = common::unsigned_token(json!({"sub": "1", "email": email}));
        let (renderer, _, _) = renderer_with(Some(&token));

        let navigation = renderer.render();

        assert!(!navigation.is_privileged(), "{} must not be privileged", email);
        assert_eq!(navigation.entries, DASHBOARD_ENTRIES.to_vec());
    }
}

#[test]
fn undecodable_credential_renders_unprivileged() {
    let missing_email = common::unsigned_token(json!({"sub": "1"}));
    for token in ["garbage", "a.b", "a.!!!.c", "e30.bm90IGpzb24.sig", missing_email.as_str()] {
        let (renderer, _, _) = renderer_with(Some(token));

        let navigation = renderer.render();

        assert!(!navigation.is_privileged(), "{:?} must render unprivileged", token);
        assert_eq!(navigation.entries.len(), DASHBOARD_ENTRIES.len());
    }
}

#[test]
fn no_credential_renders_unprivileged() {
    let (renderer, _, _) = renderer_with(None);
    assert!(!renderer.render().is_privileged());
}

#[test]
fn peek_ignores_signature_and_expiry() {
    // cosmetic only: an expired, unsigned token still picks the entry
    let token = common::unsigned_token(json!({"email": "slidespr@gmail.com", "exp": 1}));
    let (renderer, _, _) = renderer_with(Some(&token));

    assert!(renderer.render().is_privileged());
}

#[test]
fn privileged_identity_comes_from_settings() {
    let token = common::unsigned_token(json!({"email": "chief@site.org"}));
    let settings = ClientSettings {
        privileged_identity: "chief@site.org".to_string(),
        ..ClientSettings::default()
    };
    let store = Arc::new(MemoryStore::with_entry(&settings.storage_key, &token));
    let renderer = NavigationRenderer::new(settings, store, Arc::new(RecordingHost::default()));

    assert!(renderer.render().is_privileged());
}

#[test]
fn logout_erases_credential_and_goes_to_login() {
    let token = common::unsigned_token(json!({"email": "slidespr@gmail.com"}));
    let (renderer, store, host) = renderer_with(Some(&token));

    renderer.logout();

    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(host.navigations(), vec!["/cms/login".to_string()]);
    assert!(host.alerts().is_empty());
    assert!(!renderer.render().is_privileged());
}
