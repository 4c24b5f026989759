use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use mime::Mime;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::auth::token::TokenProvider;
use crate::config::Config;
use crate::error::AbsensiError;
use crate::store::FileStore;

/// Uploads photos into a fixed Drive folder via the v3 REST API.
pub struct DriveClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
    upload_url: Url,
    folder_id: String,
}

impl DriveClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<TokenProvider>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let upload_url = Url::parse(&format!(
            "{}/upload/drive/v3/files?uploadType=multipart&fields=id",
            config.drive_api_base.trim_end_matches('/')
        ))?;

        Ok(Self {
            http,
            tokens,
            upload_url,
            folder_id: config.drive_folder_id.clone(),
        })
    }
}

impl FileStore for DriveClient {
    fn create(
        &self,
        name: String,
        bytes: Vec<u8>,
        mime_type: Mime,
    ) -> BoxFuture<'_, Result<String, AbsensiError>> {
        upload(self, name, bytes, mime_type).boxed()
    }

    fn view_link(&self, object_id: &str) -> String {
        format!("https://drive.google.com/file/d/{object_id}/view?usp=sharing")
    }
}

#[derive(Deserialize)]
struct UploadedFile {
    id: String,
}

async fn upload(
    store: &DriveClient,
    name: String,
    bytes: Vec<u8>,
    mime_type: Mime,
) -> Result<String, AbsensiError> {
    let token = store.tokens.bearer_token().await?;

    let metadata = serde_json::json!({
        "name": name,
        "parents": [store.folder_id],
    })
    .to_string();

    let boundary = Uuid::new_v4().to_string();
    let body = related_body(&boundary, &metadata, &mime_type, &bytes);

    let response = store
        .http
        .post(store.upload_url.clone())
        .bearer_auth(token)
        .header(
            reqwest::header::CONTENT_TYPE,
            format!("multipart/related; boundary={boundary}"),
        )
        .body(body)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AbsensiError::Upload { source: e.into() })?;

    let uploaded: UploadedFile = response
        .json()
        .await
        .map_err(|e| AbsensiError::Upload { source: e.into() })?;

    Ok(uploaded.id)
}

// Drive's multipart upload takes a `multipart/related` body: a JSON metadata
// part naming the file and its parent folder, then the media part.
fn related_body(boundary: &str, metadata: &str, mime_type: &Mime, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + metadata.len() + 256);

    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    body
}
