// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Athlete;

/// Validates an athlete or display name and returns its trimmed form.
///
/// This function checks field-level constraints only. It does NOT check
/// uniqueness against the roster (that requires context, see
/// [`validate_name_unique`]).
///
/// # Arguments
///
/// * `name` - The name to validate (surrounding whitespace is ignored)
///
/// # Returns
///
/// The trimmed name if valid.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty after trimming
/// - The name is shorter than 2 characters
/// - The name contains anything other than ASCII letters and spaces
pub fn validate_athlete_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();

    // Rule: name must not be empty
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: name must be at least 2 characters
    if trimmed.len() < 2 {
        return Err(DomainError::InvalidName(String::from(
            "Name must be at least 2 characters",
        )));
    }

    // Rule: letters and spaces only
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ')
    {
        return Err(DomainError::InvalidName(String::from(
            "Name may only contain letters and spaces",
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates that an athlete name is unique within the current roster.
///
/// Comparison is case-insensitive over trimmed names. When updating an
/// existing athlete, pass its identifier as `exclude_id` so the athlete does
/// not collide with itself.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `name` - The candidate name (already trimmed)
/// * `existing_athletes` - The current roster
/// * `exclude_id` - Identifier of the athlete being updated, if any
///
/// # Errors
///
/// Returns an error if another athlete already carries the name.
pub fn validate_name_unique(
    name: &str,
    existing_athletes: &[Athlete],
    exclude_id: Option<&str>,
) -> Result<(), DomainError> {
    let candidate: String = name.trim().to_lowercase();

    let collision: bool = existing_athletes
        .iter()
        .filter(|athlete| exclude_id != Some(athlete.id.as_str()))
        .any(|athlete| athlete.name.trim().to_lowercase() == candidate);

    if collision {
        return Err(DomainError::DuplicateName {
            name: name.trim().to_string(),
        });
    }

    Ok(())
}
