use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong between receiving a submission and the two
/// remote services acknowledging it.
#[derive(Debug, Error)]
pub enum AbsensiError {
    #[error("photo must be a png or jpeg image")]
    UnsupportedMediaType,

    #[error("photo could not be decoded")]
    InvalidImage(#[source] image::ImageError),

    #[error("service account credentials rejected")]
    Credentials(#[source] jsonwebtoken::errors::Error),

    #[error("token exchange failed")]
    TokenExchange { source: Source },

    #[error("photo upload failed")]
    Upload { source: Source },

    #[error("attendance row append failed")]
    Append { source: Source },

    #[error("attendance sheet read failed")]
    Read { source: Source },
}

impl ResponseError for AbsensiError {
    fn status_code(&self) -> StatusCode {
        use AbsensiError::*;

        match self {
            UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            InvalidImage(_) => StatusCode::BAD_REQUEST,
            Credentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TokenExchange { .. } | Upload { .. } | Append { .. } | Read { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
