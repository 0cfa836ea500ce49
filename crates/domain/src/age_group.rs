// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Computes an athlete's age in a given reference year.
///
/// The age is the calendar-year difference between the reference year and
/// the birth year. Month and day are deliberately ignored: the club's
/// historical age-group assignments were all recorded under this convention
/// and recomputing them with full-date arithmetic would reclassify existing
/// records.
///
/// An unparsable or empty date of birth yields age 0, which classifies as
/// [`AgeGroup::PreGroup`]. Callers must tolerate this rather than treat it
/// as an error.
#[must_use]
pub fn age_at_year(date_of_birth: &str, reference_year: i32) -> i32 {
    Date::parse(date_of_birth, format_description!("[year]-[month]-[day]"))
        .map_or(0, |dob| reference_year - dob.year())
}

/// Represents a competition age group (KU).
///
/// Groups are fixed label buckets derived from integer age. The bands are
/// inclusive and partition the integers with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AgeGroup {
    /// Age 19 and above.
    Senior,
    /// Ages 16-18.
    Group1,
    /// Ages 14-15.
    Group2,
    /// Ages 12-13.
    Group3,
    /// Ages 10-11.
    Group4,
    /// Ages 8-9.
    Group5,
    /// Below age 8, including athletes with an unparsable date of birth.
    PreGroup,
}

impl AgeGroup {
    /// All age groups in descending age order.
    pub const ALL: [Self; 7] = [
        Self::Senior,
        Self::Group1,
        Self::Group2,
        Self::Group3,
        Self::Group4,
        Self::Group5,
        Self::PreGroup,
    ];

    /// Classifies an age into its age group.
    ///
    /// Bands are evaluated top-down and the first match wins.
    #[must_use]
    pub const fn from_age(age: i32) -> Self {
        if age >= 19 {
            Self::Senior
        } else if age >= 16 {
            Self::Group1
        } else if age >= 14 {
            Self::Group2
        } else if age >= 12 {
            Self::Group3
        } else if age >= 10 {
            Self::Group4
        } else if age >= 8 {
            Self::Group5
        } else {
            Self::PreGroup
        }
    }

    /// Parses an age group from its label.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid label.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Senior" => Ok(Self::Senior),
            "Group 1" => Ok(Self::Group1),
            "Group 2" => Ok(Self::Group2),
            "Group 3" => Ok(Self::Group3),
            "Group 4" => Ok(Self::Group4),
            "Group 5" => Ok(Self::Group5),
            "Pre-Group" => Ok(Self::PreGroup),
            _ => Err(DomainError::InvalidAgeGroup(format!(
                "Unknown age group: {s}"
            ))),
        }
    }

    /// Returns the display label of this age group.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Senior => "Senior",
            Self::Group1 => "Group 1",
            Self::Group2 => "Group 2",
            Self::Group3 => "Group 3",
            Self::Group4 => "Group 4",
            Self::Group5 => "Group 5",
            Self::PreGroup => "Pre-Group",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
