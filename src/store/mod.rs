pub mod drive;
pub mod sheets;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use futures::future::BoxFuture;
use mime::Mime;
use once_cell::sync::Lazy;

use crate::auth::credentials::ServiceAccountKey;
use crate::auth::token::TokenProvider;
use crate::config::Config;
use crate::error::AbsensiError;
use self::drive::DriveClient;
use self::sheets::SheetsClient;

/// One attendance row: file name, date, check-in, check-out, link, lat, lon.
pub type Row = [String; 7];

// One connection pool for both Google services.
static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// The photo object store.
pub trait FileStore: Send + Sync {
    /// Uploads `bytes` as a new object and resolves to its object id.
    fn create(
        &self,
        name: String,
        bytes: Vec<u8>,
        mime_type: Mime,
    ) -> BoxFuture<'_, Result<String, AbsensiError>>;

    /// Stable view link for an uploaded object.
    fn view_link(&self, object_id: &str) -> String;
}

/// The attendance log store.
pub trait SheetStore: Send + Sync {
    /// Appends one row after the current last row.
    fn append(&self, row: Row) -> BoxFuture<'_, Result<(), AbsensiError>>;

    /// Reads every data row, header excluded. No caching; every call hits the
    /// remote sheet.
    fn rows(&self) -> BoxFuture<'_, Result<Vec<Vec<String>>, AbsensiError>>;
}

#[derive(Clone)]
pub struct Stores {
    pub files: Arc<dyn FileStore>,
    pub sheet: Arc<dyn SheetStore>,
}

pub fn init_stores(config: &Config) -> anyhow::Result<Stores> {
    let key = ServiceAccountKey::from_file(&config.service_account_file)?;
    let tokens = Arc::new(TokenProvider::new(HTTP.clone(), key));

    Ok(Stores {
        files: Arc::new(DriveClient::new(HTTP.clone(), tokens.clone(), config)?),
        sheet: Arc::new(SheetsClient::new(HTTP.clone(), tokens, config)?),
    })
}
