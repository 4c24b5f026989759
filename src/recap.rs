use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::record::AttendanceRecord;

pub const CSV_HEADER: &str = "file_name,date,check_in,check_out,photo_link,latitude,longitude";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KindFilter {
    #[default]
    All,
    CheckIn,
    CheckOut,
}

/// Rows as read back from the sheet, leniently parsed. Rows with an
/// unreadable date cell are dropped rather than failing the recap.
pub fn parse_rows(rows: &[Vec<String>]) -> Vec<AttendanceRecord> {
    rows.iter()
        .filter_map(|row| AttendanceRecord::from_row(row))
        .collect()
}

/// Inclusive date-range plus kind filter. Absent bounds leave that side
/// open; `All` keeps both kinds.
pub fn filter_records(
    records: Vec<AttendanceRecord>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    kind: KindFilter,
) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|r| {
            if let Some(from) = date_from {
                if r.date < from {
                    return false;
                }
            }
            if let Some(to) = date_to {
                if r.date > to {
                    return false;
                }
            }

            match kind {
                KindFilter::All => true,
                KindFilter::CheckIn => r.check_in.is_some(),
                KindFilter::CheckOut => r.check_out.is_some(),
            }
        })
        .collect()
}

/// Serializes exactly the given set, header first.
pub fn to_csv(records: &[AttendanceRecord]) -> String {
    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for record in records {
        let row = record.to_row();
        let line = row.iter().map(|cell| esc(cell)).collect::<Vec<_>>().join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}
