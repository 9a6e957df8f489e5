#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use cms_auth::configuration::{AuthSettings, Settings};
use cms_auth::session::SessionHost;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;
use std::sync::Mutex;

pub const SECRET: &str = "integration-secret";
pub const PRIVILEGED: &str = "slidespr@gmail.com";

pub struct TestApp {
    pub address: String,
}

pub fn test_configuration() -> Settings {
    Settings {
        app_port: 0,
        app_host: "127.0.0.1".to_string(),
        auth: AuthSettings {
            jwt_secret: SECRET.to_string(),
            algorithm: Algorithm::HS256,
            privileged_identity: PRIVILEGED.to_string(),
        },
    }
}

pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = cms_auth::startup::run(listener, test_configuration())
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp { address }
}

pub fn create_jwt(secret: &str, email: &str, expires_in: Duration) -> String {
    let claims = json!({
        "sub": "1",
        "email": email,
        "exp": (Utc::now() + expires_in).timestamp(),
    });
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token should encode")
}

/// Well-formed token shape with an arbitrary payload and a fake signature.
pub fn unsigned_token(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.test_signature", header, payload)
}

/// Records every navigation and notice instead of showing them.
#[derive(Default)]
pub struct RecordingHost {
    navigations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl SessionHost for RecordingHost {
    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
