use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use url::Url;

use crate::auth::token::TokenProvider;
use crate::config::Config;
use crate::error::AbsensiError;
use crate::store::{Row, SheetStore};

/// Appends to and reads from one tab of a spreadsheet via the Sheets v4 REST
/// API. The append range is `<tab>!A1` (the service locates the table and
/// writes after its last row); reads start at `A2` so the header row never
/// reaches the parser.
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
    append_url: Url,
    read_url: Url,
}

impl SheetsClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<TokenProvider>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let base = config.sheets_api_base.trim_end_matches('/');

        let append_url = Url::parse(&format!(
            "{base}/v4/spreadsheets/{id}/values/{tab}!A1:append?valueInputOption=USER_ENTERED",
            id = config.sheet_id,
            tab = config.sheet_name,
        ))?;
        let read_url = Url::parse(&format!(
            "{base}/v4/spreadsheets/{id}/values/{tab}!A2:G",
            id = config.sheet_id,
            tab = config.sheet_name,
        ))?;

        Ok(Self {
            http,
            tokens,
            append_url,
            read_url,
        })
    }
}

impl SheetStore for SheetsClient {
    fn append(&self, row: Row) -> BoxFuture<'_, Result<(), AbsensiError>> {
        append(self, row).boxed()
    }

    fn rows(&self) -> BoxFuture<'_, Result<Vec<Vec<String>>, AbsensiError>> {
        read_rows(self).boxed()
    }
}

#[derive(Deserialize)]
struct ValueRange {
    // absent entirely when the range holds no data
    #[serde(default)]
    values: Vec<Vec<String>>,
}

async fn append(store: &SheetsClient, row: Row) -> Result<(), AbsensiError> {
    let token = store.tokens.bearer_token().await?;

    store
        .http
        .post(store.append_url.clone())
        .bearer_auth(token)
        .json(&serde_json::json!({ "values": [row] }))
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AbsensiError::Append { source: e.into() })?;

    Ok(())
}

async fn read_rows(store: &SheetsClient) -> Result<Vec<Vec<String>>, AbsensiError> {
    let token = store.tokens.bearer_token().await?;

    let response = store
        .http
        .get(store.read_url.clone())
        .bearer_auth(token)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AbsensiError::Read { source: e.into() })?;

    let range: ValueRange = response
        .json()
        .await
        .map_err(|e| AbsensiError::Read { source: e.into() })?;

    Ok(range.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SheetsClient {
        SheetsClient::new(
            reqwest::Client::new(),
            TokenProvider::for_tests(),
            &Config::for_tests(),
        )
        .unwrap()
    }

    #[test]
    fn append_targets_the_tab_head_with_user_entered_values() {
        assert_eq!(
            client().append_url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Absensi%20Online!A1:append?valueInputOption=USER_ENTERED"
        );
    }

    #[test]
    fn read_range_skips_the_header_row() {
        assert_eq!(
            client().read_url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Absensi%20Online!A2:G"
        );
    }

    #[test]
    fn empty_value_range_parses_to_no_rows() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Absensi Online!A2:G"}"#).unwrap();
        assert!(range.values.is_empty());
    }
}
