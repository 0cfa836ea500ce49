// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance sheet and report operations.

use crate::activity::log_activity;
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_domain_error};
use ksac_domain::{Athlete, AttendanceStatus, DomainError, Level};
use ksac_store::{AttendanceDocument, MemoryStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

/// One row of the daily sign-in sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSheetRow {
    /// The athlete identifier.
    pub athlete_id: String,
    /// The athlete's name.
    pub name: String,
    /// The athlete's level.
    pub level: u8,
    /// The status for the day. Defaults to present when no record exists.
    pub status: AttendanceStatus,
}

/// One flattened row of the attendance range report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    /// The training date.
    pub date: String,
    /// The athlete's name.
    pub athlete_name: String,
    /// The athlete's level.
    pub level: u8,
    /// The recorded status.
    pub status: AttendanceStatus,
}

/// Validates that a string is a well-formed `YYYY-MM-DD` date.
pub(crate) fn validate_date(date: &str) -> Result<(), ApiError> {
    Date::parse(date, format_description!("[year]-[month]-[day]")).map_err(|_| {
        translate_domain_error(DomainError::DateParseError {
            date_string: date.to_string(),
        })
    })?;
    Ok(())
}

/// Builds the sign-in sheet for one date.
///
/// The athlete roster is left-joined with the day's sparse record map;
/// athletes without an entry default to present.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `date` - The training date as `YYYY-MM-DD`
/// * `level_filter` - Restrict the sheet to one level
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the date is
/// malformed.
pub fn attendance_sheet(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    date: &str,
    level_filter: Option<u8>,
) -> Result<Vec<AttendanceSheetRow>, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;
    validate_date(date)?;

    let level_filter: Option<Level> = level_filter
        .map(Level::new)
        .transpose()
        .map_err(translate_domain_error)?;

    let existing: BTreeMap<String, AttendanceStatus> = store.attendance_for_date(date);

    let rows: Vec<AttendanceSheetRow> = store
        .athletes_by_name()
        .into_iter()
        .filter(|athlete| level_filter.is_none_or(|l| athlete.level == l))
        .map(|athlete| AttendanceSheetRow {
            status: existing
                .get(&athlete.id)
                .copied()
                .unwrap_or(AttendanceStatus::Present),
            athlete_id: athlete.id,
            name: athlete.name,
            level: athlete.level.number(),
        })
        .collect();

    Ok(rows)
}

/// Saves a day's attendance records.
///
/// The write is a merge into the day's document: athletes not present in
/// `records` keep their previously saved status.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `date` - The training date as `YYYY-MM-DD`
/// * `records` - Status per athlete identifier
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the date is malformed,
/// or the record set is empty.
pub fn save_attendance(
    store: &mut MemoryStore,
    actor: &AuthenticatedUser,
    date: &str,
    records: BTreeMap<String, AttendanceStatus>,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;
    validate_date(date)?;

    if records.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("records"),
            message: String::from("No attendance rows to save"),
        });
    }

    store.merge_attendance(date, records, &actor.display_name);

    log_activity(store, actor, &format!("Attendance for {date} saved."));

    Ok(())
}

/// Builds the flattened attendance report for a date range.
///
/// Recorded athletes that no longer exist in the roster are skipped.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `start` - Range start date (inclusive)
/// * `end` - Range end date (inclusive)
/// * `level_filter` - Restrict to one level
/// * `status_filter` - Restrict to one status
///
/// # Errors
///
/// Returns an error if the actor is not authorized, a date is malformed,
/// or the start date is after the end date.
pub fn attendance_report(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    start: &str,
    end: &str,
    level_filter: Option<u8>,
    status_filter: Option<AttendanceStatus>,
) -> Result<Vec<AttendanceReportRow>, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;
    validate_date(start)?;
    validate_date(end)?;

    if start > end {
        return Err(translate_domain_error(DomainError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        }));
    }

    let level_filter: Option<Level> = level_filter
        .map(Level::new)
        .transpose()
        .map_err(translate_domain_error)?;

    let athlete_map: BTreeMap<String, Athlete> = store
        .athletes_by_name()
        .into_iter()
        .map(|athlete| (athlete.id.clone(), athlete))
        .collect();

    let documents: Vec<AttendanceDocument> = store.attendance_in_range(start, end);

    let rows: Vec<AttendanceReportRow> = documents
        .iter()
        .flat_map(|document| {
            document.records.iter().filter_map(|(athlete_id, status)| {
                athlete_map.get(athlete_id).map(|athlete| AttendanceReportRow {
                    date: document.date.clone(),
                    athlete_name: athlete.name.clone(),
                    level: athlete.level.number(),
                    status: *status,
                })
            })
        })
        .filter(|row| {
            level_filter.is_none_or(|l| row.level == l.number())
                && status_filter.is_none_or(|s| row.status == s)
        })
        .collect();

    Ok(rows)
}
