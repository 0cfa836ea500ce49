// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Performance record entry, analysis, and personal bests.

use crate::activity::log_activity;
use crate::attendance::validate_date;
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_domain_error};
use ksac_domain::{
    AgeGroup, Athlete, Distance, PerformanceRecord, Role, Stroke, SwimTime, age_at_year,
    personal_bests,
};
use ksac_store::{MemoryStore, PerformanceUpdate, UserAccount};
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// Request to enter a new performance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerformanceRequest {
    /// The athlete the time belongs to.
    pub athlete_id: String,
    /// The competition or trial name.
    pub competition_name: String,
    /// Event date as `YYYY-MM-DD`.
    pub event_date: String,
    /// Stroke wire value.
    pub stroke: String,
    /// Distance in meters.
    pub distance: u16,
    /// Whole minutes (0-59).
    pub minutes: u8,
    /// Whole seconds (0-59).
    pub seconds: u8,
    /// Centiseconds (0-99).
    pub centiseconds: u8,
}

/// Request to edit an existing performance record.
///
/// The age and age-group snapshots are not part of the request; edits
/// recompute the time fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePerformanceRequest {
    /// The competition or trial name.
    pub competition_name: String,
    /// Event date as `YYYY-MM-DD`.
    pub event_date: String,
    /// Stroke wire value.
    pub stroke: String,
    /// Distance in meters.
    pub distance: u16,
    /// Whole minutes (0-59).
    pub minutes: u8,
    /// Whole seconds (0-59).
    pub seconds: u8,
    /// Centiseconds (0-99).
    pub centiseconds: u8,
}

/// Filters applied to the performance listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceFilter {
    /// Restrict to one athlete.
    pub athlete_id: Option<String>,
    /// Restrict to one stroke (wire value).
    pub stroke: Option<String>,
    /// Restrict to one distance in meters.
    pub distance: Option<u16>,
    /// Keep only the most recent N records after filtering.
    pub last_n: Option<usize>,
}

/// One point of an athlete's progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// 1-based session number in chronological order.
    pub session_number: usize,
    /// The event date.
    pub event_date: String,
    /// The competition name.
    pub competition_name: String,
    /// Elapsed time in seconds.
    pub time_seconds: f64,
    /// Elapsed time formatted as `MM:SS.cc`.
    pub time_formatted: String,
}

/// One personal-best row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBestRow {
    /// The contest number, e.g. `50m Freestyle`.
    pub contest_number: String,
    /// The competition where the best was swum.
    pub competition_name: String,
    /// The event date.
    pub event_date: String,
    /// The best time formatted as `MM:SS.cc`.
    pub best_time: String,
}

/// The personal-best table for one athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalBestResponse {
    /// The athlete the table belongs to.
    pub athlete_id: String,
    /// The athlete's name.
    pub athlete_name: String,
    /// Best-time rows in fixed stroke order, then ascending distance.
    pub rows: Vec<PersonalBestRow>,
    /// Whether the athlete has any records at all. Distinguishes "no
    /// records yet" from "nothing matched the stroke filter".
    pub had_records: bool,
}

/// Parses an event date and returns its calendar year.
fn event_year(event_date: &str) -> Result<i32, ApiError> {
    Date::parse(event_date, format_description!("[year]-[month]-[day]"))
        .map(|date| date.year())
        .map_err(|_| {
            translate_domain_error(ksac_domain::DomainError::DateParseError {
                date_string: event_date.to_string(),
            })
        })
}

/// Enters a new performance time.
///
/// The athlete's name, age in the event year, and age group are snapshotted
/// onto the record at entry time.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `request` - The entry request
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the athlete does not
/// exist, or any field is invalid.
pub fn add_performance(
    store: &mut MemoryStore,
    actor: &AuthenticatedUser,
    request: NewPerformanceRequest,
) -> Result<PerformanceRecord, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let athlete: Athlete = store.athlete(&request.athlete_id)?;

    if request.competition_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("competition_name"),
            message: String::from("Competition name cannot be empty"),
        });
    }

    let stroke: Stroke = Stroke::parse(&request.stroke).map_err(translate_domain_error)?;
    let distance: Distance = Distance::new(request.distance).map_err(translate_domain_error)?;
    let time: SwimTime = SwimTime::new(request.minutes, request.seconds, request.centiseconds)
        .map_err(translate_domain_error)?;
    let year: i32 = event_year(&request.event_date)?;

    let age: i32 = age_at_year(&athlete.date_of_birth, year);
    let record: PerformanceRecord = PerformanceRecord {
        id: String::new(),
        athlete_id: athlete.id.clone(),
        athlete_name: athlete.name.clone(),
        competition_name: request.competition_name.trim().to_string(),
        event_date: request.event_date,
        stroke,
        distance,
        time_ms: time.total_ms(),
        time_formatted: time.formatted(),
        age_at_event: age,
        age_group_at_event: AgeGroup::from_age(age).as_str().to_string(),
        recorded_by: actor.display_name.clone(),
    };

    let record: PerformanceRecord = store.add_performance_record(record);

    log_activity(
        store,
        actor,
        &format!(
            "Performance time {} for '{}' recorded.",
            record.time_formatted, record.athlete_name
        ),
    );

    Ok(record)
}

/// Lists performance records, oldest first, with optional filters.
///
/// `last_n` keeps only the most recent N records after the other filters
/// are applied.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `filter` - Listing filters
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the filter carries
/// an invalid stroke or distance.
pub fn list_performance(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    filter: &PerformanceFilter,
) -> Result<Vec<PerformanceRecord>, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let stroke: Option<Stroke> = filter
        .stroke
        .as_deref()
        .map(Stroke::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let distance: Option<Distance> = filter
        .distance
        .map(Distance::new)
        .transpose()
        .map_err(translate_domain_error)?;

    let mut records: Vec<PerformanceRecord> = filter.athlete_id.as_deref().map_or_else(
        || store.performance_records(),
        |athlete_id| store.performance_records_for(athlete_id),
    );

    records.retain(|record| {
        stroke.is_none_or(|s| record.stroke == s) && distance.is_none_or(|d| record.distance == d)
    });
    records.sort_by(|a, b| a.event_date.cmp(&b.event_date));

    if let Some(last_n) = filter.last_n
        && records.len() > last_n
    {
        records.drain(..records.len() - last_n);
    }

    Ok(records)
}

/// Edits a performance record, recomputing the time fields.
///
/// The athlete linkage and the age/age-group snapshots are untouched.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `record_id` - The record to edit
/// * `request` - The edit request
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the record does not
/// exist, or any field is invalid.
pub fn update_performance(
    store: &mut MemoryStore,
    actor: &AuthenticatedUser,
    record_id: &str,
    request: UpdatePerformanceRequest,
) -> Result<PerformanceRecord, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    store.performance_record(record_id)?;

    let stroke: Stroke = Stroke::parse(&request.stroke).map_err(translate_domain_error)?;
    let distance: Distance = Distance::new(request.distance).map_err(translate_domain_error)?;
    let time: SwimTime = SwimTime::new(request.minutes, request.seconds, request.centiseconds)
        .map_err(translate_domain_error)?;
    validate_date(&request.event_date)?;

    let update: PerformanceUpdate = PerformanceUpdate {
        competition_name: request.competition_name,
        event_date: request.event_date,
        stroke,
        distance,
        time_ms: time.total_ms(),
        time_formatted: time.formatted(),
    };

    let record: PerformanceRecord = store.update_performance_record(record_id, update)?;

    log_activity(
        store,
        actor,
        &format!(
            "Performance record for '{}' updated to {}.",
            record.athlete_name, record.time_formatted
        ),
    );

    Ok(record)
}

/// Deletes a performance record.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `record_id` - The record to delete
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the record does not
/// exist.
pub fn delete_performance(
    store: &mut MemoryStore,
    actor: &AuthenticatedUser,
    record_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let removed: PerformanceRecord = store.delete_performance_record(record_id)?;

    log_activity(
        store,
        actor,
        &format!(
            "Performance record {} for '{}' deleted.",
            removed.time_formatted, removed.athlete_name
        ),
    );

    Ok(())
}

/// Builds the chronological progress series for one athlete at one
/// (stroke, distance) combination.
///
/// A series with fewer than two points is returned as-is; deciding whether
/// that is enough to chart belongs to the presentation layer.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `athlete_id` - The athlete
/// * `stroke` - Stroke wire value
/// * `distance` - Distance in meters
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the stroke or
/// distance is invalid.
pub fn progress_series(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    athlete_id: &str,
    stroke: &str,
    distance: u16,
) -> Result<Vec<ProgressPoint>, ApiError> {
    let filter: PerformanceFilter = PerformanceFilter {
        athlete_id: Some(athlete_id.to_string()),
        stroke: Some(stroke.to_string()),
        distance: Some(distance),
        last_n: None,
    };
    let records: Vec<PerformanceRecord> = list_performance(store, actor, &filter)?;

    let points: Vec<ProgressPoint> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ProgressPoint {
            session_number: index + 1,
            event_date: record.event_date.clone(),
            competition_name: record.competition_name.clone(),
            time_seconds: f64::from(record.time_ms) / 1000.0,
            time_formatted: record.time_formatted.clone(),
        })
        .collect();

    Ok(points)
}

/// Resolves which athlete's personal bests the actor may see.
///
/// Admins and coaches pick any athlete. An athlete sees only the record
/// linked to their own account. A parent sees only their children,
/// defaulting to the first child when none is requested.
#[allow(clippy::option_if_let_else)]
fn resolve_scope(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    requested_athlete_id: Option<&str>,
) -> Result<String, ApiError> {
    match actor.role {
        Role::Admin | Role::Coach => {
            requested_athlete_id
                .map(str::to_string)
                .ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("athlete_id"),
                    message: String::from("Select an athlete to view personal bests"),
                })
        }
        Role::Athlete => {
            let linked: Athlete =
                store
                    .athlete_by_linked_account(&actor.uid)
                    .ok_or_else(|| ApiError::DomainRuleViolation {
                        rule: String::from("account_linked"),
                        message: String::from(
                            "Your account is not linked to an athlete. Contact an administrator.",
                        ),
                    })?;

            if requested_athlete_id.is_some_and(|requested| requested != linked.id) {
                return Err(ApiError::Unauthorized {
                    action: String::from("view_personal_best"),
                    required_role: String::from("Coach"),
                });
            }

            Ok(linked.id)
        }
        Role::Parent => {
            let profile: UserAccount = store.user(&actor.uid)?;

            if profile.child_athlete_ids.is_empty() {
                return Err(ApiError::DomainRuleViolation {
                    rule: String::from("account_linked"),
                    message: String::from(
                        "Your account is not linked to an athlete. Contact an administrator.",
                    ),
                });
            }

            match requested_athlete_id {
                Some(requested) => {
                    if profile.child_athlete_ids.iter().any(|id| id == requested) {
                        Ok(requested.to_string())
                    } else {
                        Err(ApiError::Unauthorized {
                            action: String::from("view_personal_best"),
                            required_role: String::from("Coach"),
                        })
                    }
                }
                None => Ok(profile.child_athlete_ids[0].clone()),
            }
        }
    }
}

/// Returns the personal-best table for an athlete, scoped by the actor's
/// role.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user
/// * `requested_athlete_id` - The athlete to view, where the role allows a
///   choice
/// * `stroke_filter` - Optional stroke wire value; `None` shows all strokes
///
/// # Errors
///
/// Returns an error if the scope resolution fails or the stroke filter is
/// invalid.
pub fn personal_bests_for(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    requested_athlete_id: Option<&str>,
    stroke_filter: Option<&str>,
) -> Result<PersonalBestResponse, ApiError> {
    let athlete_id: String = resolve_scope(store, actor, requested_athlete_id)?;
    let athlete: Athlete = store.athlete(&athlete_id)?;

    let stroke_filter: Option<Stroke> = stroke_filter
        .map(Stroke::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    let records: Vec<PerformanceRecord> = store.performance_records_for(&athlete_id);
    let best: Vec<PerformanceRecord> = personal_bests(&records, stroke_filter);

    let rows: Vec<PersonalBestRow> = best
        .iter()
        .map(|record| PersonalBestRow {
            contest_number: format!("{}m {}", record.distance.meters(), record.stroke),
            competition_name: record.competition_name.clone(),
            event_date: record.event_date.clone(),
            best_time: record.time_formatted.clone(),
        })
        .collect();

    Ok(PersonalBestResponse {
        athlete_id,
        athlete_name: athlete.name,
        rows,
        had_records: !records.is_empty(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ksac_domain::{Gender, Level};

    fn coach() -> AuthenticatedUser {
        AuthenticatedUser::new(
            String::from("uid-coach"),
            String::from("Head Coach"),
            Role::Coach,
        )
    }

    fn store_with_athlete() -> (MemoryStore, String) {
        let mut store: MemoryStore = MemoryStore::new();
        let athlete: Athlete = store.add_athlete(
            String::from("Jane Doe"),
            String::from("2010-01-01"),
            Level::new(2).unwrap(),
            Gender::Girl,
        );
        (store, athlete.id)
    }

    fn entry(athlete_id: &str, date: &str, seconds: u8, centis: u8) -> NewPerformanceRequest {
        NewPerformanceRequest {
            athlete_id: athlete_id.to_string(),
            competition_name: String::from("Regional Championship"),
            event_date: date.to_string(),
            stroke: String::from("Freestyle"),
            distance: 50,
            minutes: 0,
            seconds,
            centiseconds: centis,
        }
    }

    #[test]
    fn test_entry_snapshots_age_and_group() {
        let (mut store, athlete_id) = store_with_athlete();

        let record: PerformanceRecord =
            add_performance(&mut store, &coach(), entry(&athlete_id, "2025-06-01", 30, 0))
                .unwrap();

        assert_eq!(record.age_at_event, 15);
        assert_eq!(record.age_group_at_event, "Group 2");
        assert_eq!(record.athlete_name, "Jane Doe");
        assert_eq!(record.recorded_by, "Head Coach");
        assert_eq!(record.time_ms, 30_000);
        assert_eq!(record.time_formatted, "00:30.00");
    }

    #[test]
    fn test_entry_validates_every_field_before_write() {
        let (mut store, athlete_id) = store_with_athlete();

        let mut bad_stroke: NewPerformanceRequest = entry(&athlete_id, "2025-06-01", 30, 0);
        bad_stroke.stroke = String::from("Doggy Paddle");
        assert!(add_performance(&mut store, &coach(), bad_stroke).is_err());

        let mut bad_distance: NewPerformanceRequest = entry(&athlete_id, "2025-06-01", 30, 0);
        bad_distance.distance = 75;
        assert!(add_performance(&mut store, &coach(), bad_distance).is_err());

        let mut bad_time: NewPerformanceRequest = entry(&athlete_id, "2025-06-01", 75, 0);
        bad_time.seconds = 75;
        assert!(add_performance(&mut store, &coach(), bad_time).is_err());

        let mut bad_date: NewPerformanceRequest = entry(&athlete_id, "garbage", 30, 0);
        bad_date.event_date = String::from("garbage");
        assert!(add_performance(&mut store, &coach(), bad_date).is_err());

        let mut bad_name: NewPerformanceRequest = entry(&athlete_id, "2025-06-01", 30, 0);
        bad_name.competition_name = String::from("   ");
        assert!(add_performance(&mut store, &coach(), bad_name).is_err());

        assert!(store.performance_records().is_empty());
    }

    #[test]
    fn test_listing_is_chronological_with_last_n_window() {
        let (mut store, athlete_id) = store_with_athlete();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-03-01", 31, 0)).unwrap();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-01-01", 33, 0)).unwrap();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-05-01", 30, 0)).unwrap();

        let filter: PerformanceFilter = PerformanceFilter {
            athlete_id: Some(athlete_id),
            ..PerformanceFilter::default()
        };
        let records: Vec<PerformanceRecord> =
            list_performance(&store, &coach(), &filter).unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.event_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-01", "2025-03-01", "2025-05-01"]);

        let filter: PerformanceFilter = PerformanceFilter {
            last_n: Some(2),
            ..filter
        };
        let recent: Vec<PerformanceRecord> =
            list_performance(&store, &coach(), &filter).unwrap();
        let dates: Vec<&str> = recent.iter().map(|r| r.event_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-05-01"]);
    }

    #[test]
    fn test_edit_recomputes_time_but_not_snapshots() {
        let (mut store, athlete_id) = store_with_athlete();
        let record: PerformanceRecord =
            add_performance(&mut store, &coach(), entry(&athlete_id, "2025-06-01", 30, 0))
                .unwrap();

        let request: UpdatePerformanceRequest = UpdatePerformanceRequest {
            competition_name: String::from("National Trials"),
            // The event moves years, but the age snapshot must not change.
            event_date: String::from("2026-02-01"),
            stroke: String::from("Freestyle"),
            distance: 50,
            minutes: 0,
            seconds: 29,
            centiseconds: 45,
        };
        let updated: PerformanceRecord =
            update_performance(&mut store, &coach(), &record.id, request).unwrap();

        assert_eq!(updated.time_ms, 29_450);
        assert_eq!(updated.time_formatted, "00:29.45");
        assert_eq!(updated.age_at_event, 15);
        assert_eq!(updated.age_group_at_event, "Group 2");
        assert_eq!(updated.competition_name, "National Trials");
    }

    #[test]
    fn test_delete_removes_the_record() {
        let (mut store, athlete_id) = store_with_athlete();
        let record: PerformanceRecord =
            add_performance(&mut store, &coach(), entry(&athlete_id, "2025-06-01", 30, 0))
                .unwrap();

        delete_performance(&mut store, &coach(), &record.id).unwrap();

        assert!(store.performance_records().is_empty());
        assert!(delete_performance(&mut store, &coach(), &record.id).is_err());
    }

    #[test]
    fn test_progress_series_is_chronological_and_numbered() {
        let (mut store, athlete_id) = store_with_athlete();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-03-01", 31, 0)).unwrap();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-01-01", 33, 50)).unwrap();

        let points: Vec<ProgressPoint> =
            progress_series(&store, &coach(), &athlete_id, "Freestyle", 50).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].session_number, 1);
        assert_eq!(points[0].event_date, "2025-01-01");
        assert!((points[0].time_seconds - 33.5).abs() < f64::EPSILON);
        assert_eq!(points[1].session_number, 2);
    }

    #[test]
    fn test_coach_personal_bests_require_athlete_selection() {
        let (store, _) = store_with_athlete();

        let result = personal_bests_for(&store, &coach(), None, None);

        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    }

    #[test]
    fn test_personal_bests_reduce_and_order() {
        let (mut store, athlete_id) = store_with_athlete();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-01-01", 30, 0)).unwrap();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-02-01", 28, 50)).unwrap();
        let mut back: NewPerformanceRequest = entry(&athlete_id, "2025-03-01", 0, 0);
        back.stroke = String::from("Backstroke");
        back.distance = 100;
        back.minutes = 1;
        back.seconds = 5;
        add_performance(&mut store, &coach(), back).unwrap();

        let response: PersonalBestResponse =
            personal_bests_for(&store, &coach(), Some(&athlete_id), None).unwrap();

        assert!(response.had_records);
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.rows[0].contest_number, "100m Backstroke");
        assert_eq!(response.rows[1].contest_number, "50m Freestyle");
        assert_eq!(response.rows[1].best_time, "00:28.50");
    }

    #[test]
    fn test_athlete_sees_only_their_linked_record() {
        let (mut store, athlete_id) = store_with_athlete();
        store
            .set_linked_account(&athlete_id, Some(String::from("uid-swimmer")))
            .unwrap();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-01-01", 30, 0)).unwrap();

        let swimmer: AuthenticatedUser = AuthenticatedUser::new(
            String::from("uid-swimmer"),
            String::from("Jane Doe"),
            Role::Athlete,
        );

        let response: PersonalBestResponse =
            personal_bests_for(&store, &swimmer, None, None).unwrap();
        assert_eq!(response.athlete_id, athlete_id);

        // Requesting another athlete's id is rejected.
        let other: Athlete = store.add_athlete(
            String::from("Other Kid"),
            String::from("2011-01-01"),
            Level::new(1).unwrap(),
            Gender::Boy,
        );
        assert!(matches!(
            personal_bests_for(&store, &swimmer, Some(&other.id), None),
            Err(ApiError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_unlinked_athlete_account_gets_specific_error() {
        let (store, _) = store_with_athlete();
        let swimmer: AuthenticatedUser = AuthenticatedUser::new(
            String::from("uid-unlinked"),
            String::from("Nobody"),
            Role::Athlete,
        );

        let result = personal_bests_for(&store, &swimmer, None, None);

        assert!(matches!(
            result,
            Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "account_linked"
        ));
    }

    #[test]
    fn test_parent_scope_is_limited_to_children() {
        let (mut store, athlete_id) = store_with_athlete();
        store
            .insert_user(UserAccount {
                uid: String::from("uid-parent"),
                display_name: String::from("A Parent"),
                email: String::from("parent@example.com"),
                role: Role::Parent,
                child_athlete_ids: vec![athlete_id.clone()],
            })
            .unwrap();

        let parent: AuthenticatedUser = AuthenticatedUser::new(
            String::from("uid-parent"),
            String::from("A Parent"),
            Role::Parent,
        );

        // Defaults to the first child.
        let response: PersonalBestResponse =
            personal_bests_for(&store, &parent, None, None).unwrap();
        assert_eq!(response.athlete_id, athlete_id);
        assert!(!response.had_records);

        let other: Athlete = store.add_athlete(
            String::from("Other Kid"),
            String::from("2011-01-01"),
            Level::new(1).unwrap(),
            Gender::Boy,
        );
        assert!(matches!(
            personal_bests_for(&store, &parent, Some(&other.id), None),
            Err(ApiError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_stroke_filter_distinguishes_from_no_records() {
        let (mut store, athlete_id) = store_with_athlete();
        add_performance(&mut store, &coach(), entry(&athlete_id, "2025-01-01", 30, 0)).unwrap();

        let response: PersonalBestResponse =
            personal_bests_for(&store, &coach(), Some(&athlete_id), Some("Butterfly")).unwrap();

        // Nothing matched the filter, but the athlete does have records.
        assert!(response.rows.is_empty());
        assert!(response.had_records);
    }
}
