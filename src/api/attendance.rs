use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AbsensiError;
use crate::media;
use crate::model::record::{CaptureSource, RecordKind};
use crate::recorder;
use crate::store::Stores;

#[derive(Debug, MultipartForm)]
pub struct SubmitForm {
    /// png/jpeg photo, camera capture or picked file.
    #[multipart(limit = "10MiB")]
    pub photo: Bytes,
    pub kind: Text<RecordKind>,
    pub source: Option<Text<CaptureSource>>,
    // absent when the browser denied geolocation
    pub latitude: Option<Text<String>>,
    pub longitude: Option<Text<String>>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "message": "Checked in successfully",
    "file_name": "camera_20240105_090000.png",
    "photo_link": "https://drive.google.com/file/d/abc123/view?usp=sharing",
    "latitude": "-6.2001",
    "longitude": "106.8166"
}))]
pub struct SubmitResponse {
    pub message: String,
    pub file_name: String,
    pub photo_link: String,
    pub latitude: String,
    pub longitude: String,
}

/* =========================
Submit attendance
========================= */
/// Swagger doc for submit endpoint
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body(
        content = Object,
        description = "Multipart form: `photo` (png/jpeg file), `kind` (`check_in` | `check_out`), \
                       optional `source` (`camera` | `gallery`, default camera), optional \
                       `latitude`/`longitude` captured by the browser",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Attendance recorded", body = SubmitResponse),
        (status = 400, description = "Malformed form submission"),
        (status = 415, description = "Photo is not a png or jpeg"),
        (status = 502, description = "File store or sheet unavailable")
    ),
    tag = "Attendance"
)]
pub async fn submit(
    MultipartForm(form): MultipartForm<SubmitForm>,
    stores: web::Data<Stores>,
) -> actix_web::Result<impl Responder> {
    let kind = form.kind.into_inner();
    let source = form
        .source
        .map(Text::into_inner)
        .unwrap_or(CaptureSource::Camera);

    // location only counts when the browser sent both halves
    let location = match (form.latitude, form.longitude) {
        (Some(lat), Some(lon)) => Some((lat.into_inner(), lon.into_inner())),
        _ => None,
    };

    if let Some(name) = &form.photo.file_name {
        if !name.is_empty() && !media::has_allowed_extension(name) {
            return Err(AbsensiError::UnsupportedMediaType.into());
        }
    }

    let image_png = media::normalize(&form.photo.data)?;
    let taken_at = Local::now().naive_local();

    let record = recorder::record(&stores, image_png, kind, source, location, taken_at)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, kind = %kind, "Attendance submission failed");
            e
        })?;

    tracing::info!(file_name = %record.file_name, kind = %kind, "Attendance recorded");

    let message = match kind {
        RecordKind::CheckIn => "Checked in successfully",
        RecordKind::CheckOut => "Checked out successfully",
    };

    Ok(HttpResponse::Ok().json(SubmitResponse {
        message: message.to_string(),
        file_name: record.file_name,
        photo_link: record.photo_link,
        latitude: record.latitude,
        longitude: record.longitude,
    }))
}
