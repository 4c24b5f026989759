use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::record::AttendanceRecord;
use crate::recap::{self, KindFilter};
use crate::store::Stores;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RecapQuery {
    /// Inclusive lower bound, unbounded when absent
    #[param(example = "2024-01-01", value_type = Option<String>, format = "date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, unbounded when absent
    #[param(example = "2024-01-31", value_type = Option<String>, format = "date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub date_to: Option<NaiveDate>,
    /// all | check_in | check_out
    #[param(example = "check_in")]
    pub kind: Option<KindFilter>,
}

#[derive(Serialize, ToSchema)]
pub struct RecapResponse {
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 3)]
    pub total: usize,
}

/* =========================
Recap listing
========================= */
/// Swagger doc for recap_list endpoint
#[utoipa::path(
    get,
    path = "/api/recap",
    params(RecapQuery),
    responses(
        (status = 200, description = "Filtered attendance rows", body = RecapResponse),
        (status = 502, description = "Sheet unavailable")
    ),
    tag = "Recap"
)]
pub async fn recap_list(
    stores: web::Data<Stores>,
    query: web::Query<RecapQuery>,
) -> actix_web::Result<impl Responder> {
    let data = load_filtered(&stores, &query).await?;

    Ok(HttpResponse::Ok().json(RecapResponse {
        total: data.len(),
        data,
    }))
}

/* =========================
Recap CSV export
========================= */
/// Swagger doc for recap_export endpoint
#[utoipa::path(
    get,
    path = "/api/recap/export",
    params(RecapQuery),
    responses(
        (status = 200, description = "CSV attachment of the filtered rows", body = String, content_type = "text/csv"),
        (status = 404, description = "Nothing matches the selected filters"),
        (status = 502, description = "Sheet unavailable")
    ),
    tag = "Recap"
)]
pub async fn recap_export(
    stores: web::Data<Stores>,
    query: web::Query<RecapQuery>,
) -> actix_web::Result<impl Responder> {
    let data = load_filtered(&stores, &query).await?;

    if data.is_empty() {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "No attendance rows match the selected filters"
        })));
    }

    let csv = recap::to_csv(&data);
    let file_name = format!("rekap_{}.csv", Local::now().format("%Y%m%d"));

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            actix_web::http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(csv))
}

async fn load_filtered(
    stores: &Stores,
    query: &RecapQuery,
) -> Result<Vec<AttendanceRecord>, actix_web::Error> {
    let kind = query.kind.unwrap_or_default();

    // always re-read; the sheet is the single source of truth
    let rows = stores.sheet.rows().await.map_err(|e| {
        tracing::error!(error = %e, "Recap read failed");
        e
    })?;

    let records = recap::parse_rows(&rows);
    tracing::debug!(rows = rows.len(), parsed = records.len(), kind = %kind, "Recap loaded");

    Ok(recap::filter_records(
        records,
        query.date_from,
        query.date_to,
        kind,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{CaptureSource, RecordKind, file_name_for};
    use crate::store::mock::mock_stores;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use chrono::{NaiveDateTime, NaiveTime};

    fn seeded_stores(rows: Vec<AttendanceRecord>) -> Stores {
        let (stores, _files, sheet) = mock_stores();

        for record in rows {
            sheet.appended.write().unwrap().push(record.to_row());
        }

        stores
    }

    macro_rules! recap_app {
        ($stores:expr) => {
            test::init_service(
                App::new().app_data(Data::new($stores)).service(
                    web::scope("/recap")
                        .service(web::resource("").route(web::get().to(recap_list)))
                        .service(web::resource("/export").route(web::get().to(recap_export))),
                ),
            )
            .await
        };
    }

    fn record(date: &str, time: &str, kind: RecordKind) -> AttendanceRecord {
        let taken_at = NaiveDateTime::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
        );

        AttendanceRecord::new(
            file_name_for(CaptureSource::Camera, taken_at),
            taken_at,
            kind,
            "https://drive.google.com/file/d/x/view?usp=sharing".to_string(),
            None,
        )
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record("2024-01-04", "08:55:00", RecordKind::CheckIn),
            record("2024-01-05", "09:00:00", RecordKind::CheckIn),
            record("2024-01-05", "17:05:00", RecordKind::CheckOut),
        ]
    }

    #[derive(serde::Deserialize)]
    struct RecapBody {
        data: Vec<AttendanceRecord>,
        total: usize,
    }

    #[actix_web::test]
    async fn unfiltered_recap_returns_every_row() {
        let app = recap_app!(seeded_stores(sample()));

        let req = test::TestRequest::get().uri("/recap").to_request();
        let body: RecapBody = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total, 3);
        assert_eq!(body.data, sample());
    }

    #[actix_web::test]
    async fn kind_and_date_filters_combine() {
        let app = recap_app!(seeded_stores(sample()));

        let req = test::TestRequest::get()
            .uri("/recap?date_from=2024-01-05&date_to=2024-01-05&kind=check_in")
            .to_request();
        let body: RecapBody = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total, 1);
        assert_eq!(body.data[0].check_in.unwrap().to_string(), "09:00:00");
        assert!(body.data[0].check_out.is_none());
    }

    #[actix_web::test]
    async fn export_serves_a_csv_attachment() {
        let app = recap_app!(seeded_stores(sample()));

        let req = test::TestRequest::get()
            .uri("/recap/export?kind=check_out")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        assert!(
            response
                .headers()
                .get("content-disposition")
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("attachment; filename=\"rekap_")
        );

        let body = test::read_body(response).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("17:05:00"));
    }

    #[actix_web::test]
    async fn export_with_no_matches_is_not_offered() {
        let app = recap_app!(seeded_stores(sample()));

        let req = test::TestRequest::get()
            .uri("/recap/export?date_from=2024-02-01&date_to=2024-02-01")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 404);
    }

    #[actix_web::test]
    async fn unreadable_rows_are_skipped_not_fatal() {
        let (stores, _files, sheet) = mock_stores();
        sheet.appended.write().unwrap().push([
            "x.png".to_string(),
            "garbage".to_string(),
            "".to_string(),
            "".to_string(),
            "".to_string(),
            "".to_string(),
            "".to_string(),
        ]);
        sheet
            .appended
            .write()
            .unwrap()
            .push(record("2024-01-05", "09:00:00", RecordKind::CheckIn).to_row());

        let app = test::init_service(
            App::new()
                .app_data(Data::new(stores))
                .service(web::resource("/recap").route(web::get().to(recap_list))),
        )
        .await;

        let req = test::TestRequest::get().uri("/recap").to_request();
        let body: RecapBody = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.total, 1);
        assert_eq!(body.data[0].file_name, "camera_20240105_090000.png");
    }
}
