use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    /// Path to the Google service-account key JSON.
    pub service_account_file: String,
    pub drive_folder_id: String,
    pub sheet_id: String,
    pub sheet_name: String,
    pub drive_api_base: String,
    pub sheets_api_base: String,

    // Rate limiting
    pub rate_submit_per_min: u32,
    pub rate_recap_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            service_account_file: env::var("GOOGLE_SERVICE_ACCOUNT_FILE")
                .expect("GOOGLE_SERVICE_ACCOUNT_FILE must be set"),
            drive_folder_id: env::var("DRIVE_FOLDER_ID").expect("DRIVE_FOLDER_ID must be set"),
            sheet_id: env::var("SHEET_ID").expect("SHEET_ID must be set"),
            sheet_name: env::var("SHEET_NAME").unwrap_or_else(|_| "Absensi Online".to_string()),

            drive_api_base: env::var("DRIVE_API_BASE")
                .unwrap_or_else(|_| "https://www.googleapis.com".to_string()),
            sheets_api_base: env::var("SHEETS_API_BASE")
                .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string()),

            rate_submit_per_min: env::var("RATE_SUBMIT_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_recap_per_min: env::var("RATE_RECAP_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            service_account_file: "key.json".to_string(),
            drive_folder_id: "folder".to_string(),
            sheet_id: "sheet-1".to_string(),
            sheet_name: "Absensi Online".to_string(),
            drive_api_base: "https://www.googleapis.com".to_string(),
            sheets_api_base: "https://sheets.googleapis.com".to_string(),
            rate_submit_per_min: 30,
            rate_recap_per_min: 60,
            api_prefix: "/api".to_string(),
        }
    }
}
