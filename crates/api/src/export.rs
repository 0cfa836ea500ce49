// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV report building.
//!
//! Reports are UTF-8 CSV with the club's localized column headers and
//! standard quoting only. Filenames are assembled from the active filters
//! so downloads are self-describing.

use crate::athletes::{AthleteFilter, AthleteRow, filter_athletes};
use crate::attendance::{AttendanceReportRow, attendance_report};
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::clock::current_year;
use crate::error::ApiError;
use crate::fees::{FeeStatusFilter, FeeStatusRow, MONTH_NAMES, fee_status_rows, month_key};
use crate::performance::{PerformanceFilter, PersonalBestResponse, list_performance, personal_bests_for};
use ksac_domain::{AttendanceStatus, PerformanceRecord};
use ksac_store::MemoryStore;
use serde::{Deserialize, Serialize};

/// A built CSV report ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvExport {
    /// The suggested download filename.
    pub filename: String,
    /// The UTF-8 CSV content.
    pub content: String,
}

/// Serializes headers and rows into a CSV string.
fn write_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row).map_err(csv_error)?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ApiError::Backend {
            message: format!("CSV buffer error: {e}"),
        })?;

    String::from_utf8(bytes).map_err(|e| ApiError::Backend {
        message: format!("CSV encoding error: {e}"),
    })
}

fn csv_error(err: csv::Error) -> ApiError {
    ApiError::Backend {
        message: format!("CSV write error: {err}"),
    }
}

/// Reformats a `YYYY-MM-DD` date as `DD/MM/YYYY` for display. Dates that
/// do not match the stored shape pass through unchanged.
fn display_date(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) if !day.is_empty() => {
            format!("{day}/{month}/{year}")
        }
        _ => date.to_string(),
    }
}

/// Lowercases a filename fragment and replaces spaces with underscores.
fn filename_fragment(value: &str) -> String {
    value.to_lowercase().replace(' ', "_")
}

/// Builds the athlete roster report.
///
/// Columns: No, Nama Atlet, Tanggal Lahir, Usia, KU, Jenis Kelamin, Level.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the filter is invalid,
/// or no row matches the filter.
pub fn export_athletes(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    filter: &AthleteFilter,
) -> Result<CsvExport, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let rows: Vec<AthleteRow> =
        filter_athletes(&store.athletes_by_name(), filter, current_year())?;

    if rows.is_empty() {
        return Err(ApiError::EmptyReport);
    }

    let records: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.name.clone(),
                row.date_of_birth.clone(),
                row.age.to_string(),
                row.age_group.clone(),
                row.gender.clone(),
                row.level.to_string(),
            ]
        })
        .collect();

    let content: String = write_csv(
        &[
            "No",
            "Nama Atlet",
            "Tanggal Lahir",
            "Usia",
            "KU",
            "Jenis Kelamin",
            "Level",
        ],
        &records,
    )?;

    Ok(CsvExport {
        filename: String::from("laporan_atlet.csv"),
        content,
    })
}

/// Builds the attendance range report.
///
/// Columns: Tanggal, Nama Atlet, Level, Status.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the range is invalid,
/// or no row matches the filters.
pub fn export_attendance(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    start: &str,
    end: &str,
    level_filter: Option<u8>,
    status_filter: Option<AttendanceStatus>,
) -> Result<CsvExport, ApiError> {
    let rows: Vec<AttendanceReportRow> =
        attendance_report(store, actor, start, end, level_filter, status_filter)?;

    if rows.is_empty() {
        return Err(ApiError::EmptyReport);
    }

    let records: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.date.clone(),
                row.athlete_name.clone(),
                row.level.to_string(),
                row.status.as_str().to_string(),
            ]
        })
        .collect();

    let content: String = write_csv(&["Tanggal", "Nama Atlet", "Level", "Status"], &records)?;

    Ok(CsvExport {
        filename: format!("laporan_absensi_{start}_sd_{end}.csv"),
        content,
    })
}

/// Builds the monthly fee (SPP) report.
///
/// Columns: No., Nama Atlet, Level, Status, Nominal. The filename carries
/// the month name plus any active filters.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the month or filter is
/// invalid, or no row matches the filters.
pub fn export_fees(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    year: i32,
    month: u8,
    filter: &FeeStatusFilter,
) -> Result<CsvExport, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    // Validates the month before any row work.
    month_key(year, month)?;

    let rows: Vec<FeeStatusRow> = fee_status_rows(store, year, month, filter)?;

    if rows.is_empty() {
        return Err(ApiError::EmptyReport);
    }

    let records: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.name.clone(),
                row.level.to_string(),
                row.status.as_str().to_string(),
                row.amount.to_string(),
            ]
        })
        .collect();

    let content: String = write_csv(
        &["No.", "Nama Atlet", "Level", "Status", "Nominal"],
        &records,
    )?;

    let mut filename_parts: Vec<String> = vec![
        String::from("laporan_spp"),
        filename_fragment(MONTH_NAMES[usize::from(month) - 1]),
        year.to_string(),
    ];
    if let Some(level) = filter.level {
        filename_parts.push(format!("level_{level}"));
    }
    if let Some(status) = filter.status {
        filename_parts.push(filename_fragment(status.as_str()));
    }

    Ok(CsvExport {
        filename: format!("{}.csv", filename_parts.join("_")),
        content,
    })
}

/// Builds the performance listing report.
///
/// Columns: No., Nama Atlet, Nama Event, Tanggal, Usia, KU, Gaya, Jarak
/// (m), Waktu.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the filter is invalid,
/// or no row matches the filters.
pub fn export_performance(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    filter: &PerformanceFilter,
) -> Result<CsvExport, ApiError> {
    let records: Vec<PerformanceRecord> = list_performance(store, actor, filter)?;

    if records.is_empty() {
        return Err(ApiError::EmptyReport);
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            vec![
                (index + 1).to_string(),
                record.athlete_name.clone(),
                record.competition_name.clone(),
                display_date(&record.event_date),
                record.age_at_event.to_string(),
                record.age_group_at_event.clone(),
                record.stroke.as_str().to_string(),
                record.distance.meters().to_string(),
                record.time_formatted.clone(),
            ]
        })
        .collect();

    let content: String = write_csv(
        &[
            "No.",
            "Nama Atlet",
            "Nama Event",
            "Tanggal",
            "Usia",
            "KU",
            "Gaya",
            "Jarak (m)",
            "Waktu",
        ],
        &rows,
    )?;

    let mut filename_parts: Vec<String> = vec![String::from("laporan")];
    if let Some(athlete_id) = filter.athlete_id.as_deref()
        && let Ok(athlete) = store.athlete(athlete_id)
        && let Some(first_name) = athlete.name.split_whitespace().next()
    {
        filename_parts.push(filename_fragment(first_name));
    }
    if let Some(distance) = filter.distance {
        filename_parts.push(format!("{distance}m"));
    }
    if let Some(stroke) = filter.stroke.as_deref() {
        filename_parts.push(filename_fragment(stroke));
    }

    let filename: String = if filename_parts.len() > 1 {
        format!("{}.csv", filename_parts.join("_"))
    } else {
        String::from("laporan_performa.csv")
    };

    Ok(CsvExport { filename, content })
}

/// Builds the personal-best report for one athlete.
///
/// Columns: No., Nomor Pertandingan, Nama Event, Tanggal, Waktu Terbaik.
///
/// # Errors
///
/// Returns an error if the scope resolution fails, the stroke filter is
/// invalid, or the table is empty.
pub fn export_personal_bests(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    requested_athlete_id: Option<&str>,
    stroke_filter: Option<&str>,
) -> Result<CsvExport, ApiError> {
    let response: PersonalBestResponse =
        personal_bests_for(store, actor, requested_athlete_id, stroke_filter)?;

    if response.rows.is_empty() {
        return Err(ApiError::EmptyReport);
    }

    let rows: Vec<Vec<String>> = response
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.contest_number.clone(),
                row.competition_name.clone(),
                display_date(&row.event_date),
                row.best_time.clone(),
            ]
        })
        .collect();

    let content: String = write_csv(
        &[
            "No.",
            "Nomor Pertandingan",
            "Nama Event",
            "Tanggal",
            "Waktu Terbaik",
        ],
        &rows,
    )?;

    let mut filename: String = format!("pb_{}", filename_fragment(&response.athlete_name));
    if let Some(stroke) = stroke_filter {
        filename.push('_');
        filename.push_str(&filename_fragment(stroke));
    }
    filename.push_str(".csv");

    Ok(CsvExport { filename, content })
}
