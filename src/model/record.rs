use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The two attendance event types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    // the form UI also posts the Indonesian labels Masuk/Keluar
    #[serde(alias = "masuk", alias = "Masuk")]
    CheckIn,
    #[serde(alias = "keluar", alias = "Keluar")]
    CheckOut,
}

/// Where the photo came from; becomes the file-name prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaptureSource {
    Camera,
    Gallery,
}

/// One appended spreadsheet row. Immutable once written; exactly one of
/// `check_in`/`check_out` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "file_name": "camera_20240105_090000.png",
    "date": "2024-01-05",
    "check_in": "09:00:00",
    "check_out": null,
    "photo_link": "https://drive.google.com/file/d/abc123/view?usp=sharing",
    "latitude": "-6.2001",
    "longitude": "106.8166"
}))]
pub struct AttendanceRecord {
    #[schema(example = "camera_20240105_090000.png")]
    pub file_name: String,

    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = Option<String>)]
    pub check_in: Option<NaiveTime>,

    #[schema(example = "17:00:00", value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,

    #[schema(example = "https://drive.google.com/file/d/abc123/view?usp=sharing")]
    pub photo_link: String,

    /// Empty when the browser never supplied a location.
    #[schema(example = "-6.2001")]
    pub latitude: String,

    #[schema(example = "106.8166")]
    pub longitude: String,
}

impl AttendanceRecord {
    pub fn new(
        file_name: String,
        taken_at: NaiveDateTime,
        kind: RecordKind,
        photo_link: String,
        location: Option<(String, String)>,
    ) -> Self {
        let (latitude, longitude) = location.unwrap_or_default();

        Self {
            file_name,
            date: taken_at.date(),
            check_in: (kind == RecordKind::CheckIn).then(|| taken_at.time()),
            check_out: (kind == RecordKind::CheckOut).then(|| taken_at.time()),
            photo_link,
            latitude,
            longitude,
        }
    }

    /// The 7 ordered cells the sheet stores, empty strings for unset fields.
    pub fn to_row(&self) -> [String; 7] {
        let time_cell =
            |t: Option<NaiveTime>| t.map(|t| t.format(TIME_FORMAT).to_string()).unwrap_or_default();

        [
            self.file_name.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            time_cell(self.check_in),
            time_cell(self.check_out),
            self.photo_link.clone(),
            self.latitude.clone(),
            self.longitude.clone(),
        ]
    }

    /// Lenient inverse of [`to_row`]: missing trailing cells read as empty,
    /// unparseable time cells read as unset. A row whose date cell does not
    /// parse is unusable and yields `None`.
    ///
    /// [`to_row`]: Self::to_row
    pub fn from_row(row: &[String]) -> Option<Self> {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("").trim();
        let time = |s: &str| NaiveTime::parse_from_str(s, TIME_FORMAT).ok();

        let date = NaiveDate::parse_from_str(cell(1), DATE_FORMAT).ok()?;

        Some(Self {
            file_name: cell(0).to_string(),
            date,
            check_in: time(cell(2)),
            check_out: time(cell(3)),
            photo_link: cell(4).to_string(),
            latitude: cell(5).to_string(),
            longitude: cell(6).to_string(),
        })
    }
}

/// `<prefix>_<timestamp>.png`, unique per submission.
pub fn file_name_for(source: CaptureSource, taken_at: NaiveDateTime) -> String {
    format!("{}_{}.png", source, taken_at.format(FILE_STAMP_FORMAT))
}
