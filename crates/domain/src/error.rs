// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Athlete name is empty, too short, or contains forbidden characters.
    InvalidName(String),
    /// Athlete name collides with an existing athlete (case-insensitive).
    DuplicateName {
        /// The name that was rejected.
        name: String,
    },
    /// Level is outside the allowed range.
    InvalidLevel(&'static str),
    /// Gender value is not recognized.
    InvalidGender(String),
    /// Role value is not recognized.
    InvalidRole(String),
    /// Stroke value is not recognized.
    InvalidStroke(String),
    /// Distance is not one of the contested distances.
    InvalidDistance {
        /// The rejected distance in meters.
        meters: u16,
    },
    /// Swim time components are out of range.
    InvalidSwimTime(&'static str),
    /// Formatted swim time string could not be parsed.
    SwimTimeParseError {
        /// The invalid time string.
        time_string: String,
    },
    /// Attendance status value is not recognized.
    InvalidAttendanceStatus(String),
    /// Payment status value is not recognized.
    InvalidPaymentStatus(String),
    /// Payment method value is not recognized.
    InvalidPaymentMethod(String),
    /// Age group label is not recognized.
    InvalidAgeGroup(String),
    /// Month number is outside 1-12.
    InvalidMonth {
        /// The rejected month number.
        month: u8,
    },
    /// A date range has its start after its end.
    InvalidDateRange {
        /// The range start date.
        start: String,
        /// The range end date.
        end: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DuplicateName { name } => {
                write!(f, "An athlete named '{name}' is already registered")
            }
            Self::InvalidLevel(msg) => write!(f, "Invalid level: {msg}"),
            Self::InvalidGender(msg) => write!(f, "Invalid gender: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidStroke(msg) => write!(f, "Invalid stroke: {msg}"),
            Self::InvalidDistance { meters } => {
                write!(f, "Distance {meters}m is not a contested distance")
            }
            Self::InvalidSwimTime(msg) => write!(f, "Invalid swim time: {msg}"),
            Self::SwimTimeParseError { time_string } => {
                write!(f, "Failed to parse swim time '{time_string}'")
            }
            Self::InvalidAttendanceStatus(msg) => {
                write!(f, "Invalid attendance status: {msg}")
            }
            Self::InvalidPaymentStatus(msg) => write!(f, "Invalid payment status: {msg}"),
            Self::InvalidPaymentMethod(msg) => write!(f, "Invalid payment method: {msg}"),
            Self::InvalidAgeGroup(msg) => write!(f, "Invalid age group: {msg}"),
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}")
            }
            Self::DateParseError { date_string } => {
                write!(f, "Failed to parse date '{date_string}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
