use crate::api::attendance::SubmitResponse;
use crate::api::recap::{RecapQuery, RecapResponse};
use crate::model::record::{AttendanceRecord, CaptureSource, RecordKind};
use crate::recap::KindFilter;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Absensi Online API",
        version = "1.0.0",
        description = r#"
## Absensi Online

Photo-based attendance logging backed by Google Drive and Google Sheets.

### Key Features
- **Attendance Submission**
  - Check-in / check-out with a camera capture or gallery photo
  - Browser geolocation recorded when the user grants it
- **Recap**
  - Date-range and kind filters over the full attendance log
  - CSV export of exactly the filtered rows

### Storage
Each submission uploads one photo to a Drive folder and appends one row to a
sheet tab; the recap re-reads that tab on every request.

---
Built with **Rust** and **Actix Web**.
"#,
    ),
    paths(
        crate::api::attendance::submit,

        crate::api::recap::recap_list,
        crate::api::recap::recap_export,
    ),
    components(
        schemas(
            AttendanceRecord,
            RecordKind,
            CaptureSource,
            KindFilter,
            RecapQuery,
            RecapResponse,
            SubmitResponse
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance submission APIs"),
        (name = "Recap", description = "Attendance recap and export APIs"),
    )
)]
pub struct ApiDoc;
