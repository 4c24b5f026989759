use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use moka::future::Cache;
use serde::{Deserialize, Serialize};

use crate::auth::credentials::ServiceAccountKey;
use crate::error::AbsensiError;

/// Drive + Spreadsheets, the two scopes the service writes with.
pub const SCOPES: &str =
    "https://www.googleapis.com/auth/drive https://www.googleapis.com/auth/spreadsheets";

const ASSERTION_TTL: usize = 3600;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: usize,
    exp: usize,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Signs a service-account JWT assertion and trades it for a bearer token at
/// the key's token endpoint. Tokens are cached until shortly before Google's
/// one-hour expiry; attendance data itself is never cached.
pub struct TokenProvider {
    http: reqwest::Client,
    key: ServiceAccountKey,
    cache: Cache<String, String>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, key: ServiceAccountKey) -> Self {
        let cache = Cache::builder()
            .max_capacity(4)
            .time_to_live(Duration::from_secs(3300))
            .build();

        Self { http, key, cache }
    }

    pub async fn bearer_token(&self) -> Result<String, AbsensiError> {
        if let Some(token) = self.cache.get(SCOPES).await {
            return Ok(token);
        }

        let token = self.fetch_token().await?;
        self.cache.insert(SCOPES.to_string(), token.clone()).await;

        Ok(token)
    }

    fn assertion(&self) -> Result<String, AbsensiError> {
        let iat = now();
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: SCOPES.to_string(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_TTL,
        };

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(AbsensiError::Credentials)?;

        encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(AbsensiError::Credentials)
    }

    async fn fetch_token(&self) -> Result<String, AbsensiError> {
        let assertion = self.assertion()?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AbsensiError::TokenExchange { source: e.into() })?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AbsensiError::TokenExchange { source: e.into() })?;

        Ok(body.access_token)
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::new(
            reqwest::Client::new(),
            ServiceAccountKey {
                client_email: "svc@p.iam.gserviceaccount.com".to_string(),
                private_key: "not a real key".to_string(),
                token_uri: "https://oauth2.googleapis.com/token".to_string(),
            },
        ))
    }
}
