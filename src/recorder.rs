use chrono::NaiveDateTime;

use crate::error::AbsensiError;
use crate::model::record::{AttendanceRecord, CaptureSource, RecordKind, file_name_for};
use crate::store::Stores;

/// Persists one attendance event: uploads the normalized photo, then appends
/// the row. Two independent remote calls, no transaction across them. When
/// the append fails after the upload succeeded, the uploaded object stays
/// behind with no row and the error propagates.
pub async fn record(
    stores: &Stores,
    image_png: Vec<u8>,
    kind: RecordKind,
    source: CaptureSource,
    location: Option<(String, String)>,
    taken_at: NaiveDateTime,
) -> Result<AttendanceRecord, AbsensiError> {
    let file_name = file_name_for(source, taken_at);

    let object_id = stores
        .files
        .create(file_name.clone(), image_png, mime::IMAGE_PNG)
        .await?;
    let photo_link = stores.files.view_link(&object_id);

    let record = AttendanceRecord::new(file_name, taken_at, kind, photo_link, location);
    stores.sheet.append(record.to_row()).await?;

    Ok(record)
}
