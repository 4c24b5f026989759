use anyhow::Context;
use serde::Deserialize;

/// The service-account key blob the hosting environment supplies. Only the
/// fields the token flow needs are kept from the JSON.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read service account key from {path}"))?;

        serde_json::from_str(&raw).with_context(|| format!("parse service account key {path}"))
    }
}
