// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Athlete roster operations.

use crate::activity::log_activity;
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::clock::current_year;
use crate::error::{ApiError, translate_domain_error};
use ksac_domain::{
    AgeGroup, Athlete, Gender, Level, age_at_year, validate_athlete_name, validate_name_unique,
};
use ksac_store::{MemoryStore, RosterCache};
use serde::{Deserialize, Serialize};

/// Page size of the roster list view.
pub const ATHLETES_PER_PAGE: usize = 8;

/// Filters applied to the roster list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteFilter {
    /// Case-insensitive name substring.
    pub name_query: Option<String>,
    /// Restrict to one level.
    pub level: Option<u8>,
    /// Restrict to one age group.
    pub age_group: Option<String>,
    /// Restrict to one gender.
    pub gender: Option<String>,
}

/// One roster row, enriched with the derived age and age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteRow {
    /// The athlete identifier.
    pub id: String,
    /// The athlete's name.
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Age in the current year.
    pub age: i32,
    /// Age-group label for the current year.
    pub age_group: String,
    /// Gender label.
    pub gender: String,
    /// Level number.
    pub level: u8,
}

/// A page of roster rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthletePage {
    /// The rows on this page.
    pub rows: Vec<AthleteRow>,
    /// The page number (1-based, clamped to the available pages).
    pub page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total number of rows matching the filter.
    pub total_matching: usize,
}

/// Request to add a new athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAthleteRequest {
    /// The athlete's full name.
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Level number (1-5).
    pub level: u8,
    /// Gender label (`Boy` or `Girl`).
    pub gender: String,
}

/// Request to update an existing athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAthleteRequest {
    /// The athlete's full name.
    pub name: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub date_of_birth: String,
    /// Level number (1-5).
    pub level: u8,
    /// Gender label (`Boy` or `Girl`).
    pub gender: String,
}

/// Builds the display row for one athlete in a given reference year.
pub(crate) fn athlete_row(athlete: &Athlete, reference_year: i32) -> AthleteRow {
    let age: i32 = age_at_year(&athlete.date_of_birth, reference_year);
    AthleteRow {
        id: athlete.id.clone(),
        name: athlete.name.clone(),
        date_of_birth: athlete.date_of_birth.clone(),
        age,
        age_group: AgeGroup::from_age(age).as_str().to_string(),
        gender: athlete.gender.as_str().to_string(),
        level: athlete.level.number(),
    }
}

/// Applies a roster filter and returns the matching display rows.
///
/// # Errors
///
/// Returns an error if the filter carries an invalid level, age group, or
/// gender value.
pub(crate) fn filter_athletes(
    athletes: &[Athlete],
    filter: &AthleteFilter,
    reference_year: i32,
) -> Result<Vec<AthleteRow>, ApiError> {
    let level: Option<Level> = filter
        .level
        .map(Level::new)
        .transpose()
        .map_err(translate_domain_error)?;
    let age_group: Option<AgeGroup> = filter
        .age_group
        .as_deref()
        .map(AgeGroup::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let gender: Option<Gender> = filter
        .gender
        .as_deref()
        .map(Gender::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let name_query: Option<String> = filter
        .name_query
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    let rows: Vec<AthleteRow> = athletes
        .iter()
        .filter(|athlete| level.is_none_or(|l| athlete.level == l))
        .filter(|athlete| gender.is_none_or(|g| athlete.gender == g))
        .filter(|athlete| {
            name_query
                .as_deref()
                .is_none_or(|q| athlete.name.to_lowercase().contains(q))
        })
        .map(|athlete| athlete_row(athlete, reference_year))
        .filter(|row| {
            age_group.is_none_or(|g| row.age_group == g.as_str())
        })
        .collect();

    Ok(rows)
}

/// Slices rows into one page, clamping the requested page number.
pub(crate) fn paginate<T: Clone>(rows: &[T], page: usize, per_page: usize) -> (Vec<T>, usize, usize) {
    let total_pages: usize = rows.len().div_ceil(per_page).max(1);
    let page: usize = page.clamp(1, total_pages);
    let start: usize = (page - 1) * per_page;
    let slice: Vec<T> = rows.iter().skip(start).take(per_page).cloned().collect();
    (slice, page, total_pages)
}

/// Lists the athlete roster with filters and pagination.
///
/// Reads go through the roster cache and may be stale by up to its
/// time-to-live.
///
/// # Arguments
///
/// * `store` - The document store
/// * `cache` - The roster cache
/// * `actor` - The authenticated user (must be admin or coach)
/// * `filter` - Roster filters
/// * `page` - The 1-based page to return
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the filter is
/// invalid.
pub fn list_athletes(
    store: &MemoryStore,
    cache: &mut RosterCache,
    actor: &AuthenticatedUser,
    filter: &AthleteFilter,
    page: usize,
) -> Result<AthletePage, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let roster: Vec<Athlete> = cache.get_or_refresh(|| Ok(store.athletes_by_name()))?;
    let rows: Vec<AthleteRow> = filter_athletes(&roster, filter, current_year())?;

    let total_matching: usize = rows.len();
    let (rows, page, total_pages) = paginate(&rows, page, ATHLETES_PER_PAGE);

    Ok(AthletePage {
        rows,
        page,
        total_pages,
        total_matching,
    })
}

/// Validates the shared fields of an add/update request.
fn validate_fields(
    name: &str,
    level: u8,
    gender: &str,
) -> Result<(String, Level, Gender), ApiError> {
    let name: String = validate_athlete_name(name).map_err(translate_domain_error)?;
    let level: Level = Level::new(level).map_err(translate_domain_error)?;
    let gender: Gender = Gender::parse(gender).map_err(translate_domain_error)?;
    Ok((name, level, gender))
}

/// Adds a new athlete to the roster.
///
/// All validation happens before any write; a rejected request leaves the
/// store untouched. The roster cache is invalidated eagerly on success.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, a field is invalid, or
/// the name is already registered (case-insensitive).
pub fn add_athlete(
    store: &mut MemoryStore,
    cache: &mut RosterCache,
    actor: &AuthenticatedUser,
    request: AddAthleteRequest,
) -> Result<AthleteRow, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let (name, level, gender) = validate_fields(&request.name, request.level, &request.gender)?;

    // Uniqueness is checked against the store, not the cache.
    validate_name_unique(&name, &store.athletes_by_name(), None)
        .map_err(translate_domain_error)?;

    let athlete: Athlete = store.add_athlete(name.clone(), request.date_of_birth, level, gender);
    cache.invalidate();

    log_activity(store, actor, &format!("Athlete '{name}' added."));

    Ok(athlete_row(&athlete, current_year()))
}

/// Updates an existing athlete.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the athlete does not
/// exist, a field is invalid, or the new name collides with another
/// athlete.
pub fn update_athlete(
    store: &mut MemoryStore,
    cache: &mut RosterCache,
    actor: &AuthenticatedUser,
    athlete_id: &str,
    request: UpdateAthleteRequest,
) -> Result<AthleteRow, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    // Existence first so an unknown id is not reported as a name problem.
    store.athlete(athlete_id)?;

    let (name, level, gender) = validate_fields(&request.name, request.level, &request.gender)?;

    validate_name_unique(&name, &store.athletes_by_name(), Some(athlete_id))
        .map_err(translate_domain_error)?;

    let athlete: Athlete =
        store.update_athlete(athlete_id, name.clone(), request.date_of_birth, level, gender)?;
    cache.invalidate();

    log_activity(store, actor, &format!("Athlete '{name}' updated."));

    Ok(athlete_row(&athlete, current_year()))
}

/// Deletes an athlete.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator or the athlete
/// does not exist.
pub fn delete_athlete(
    store: &mut MemoryStore,
    cache: &mut RosterCache,
    actor: &AuthenticatedUser,
    athlete_id: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_delete_athlete(actor)?;

    let removed: Athlete = store.delete_athlete(athlete_id)?;
    cache.invalidate();

    log_activity(
        store,
        actor,
        &format!("Athlete '{}' deleted.", removed.name),
    );

    Ok(())
}
