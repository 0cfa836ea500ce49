// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Represents a swimming stroke.
///
/// Strokes are fixed domain constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stroke {
    /// Freestyle.
    Freestyle,
    /// Backstroke.
    Backstroke,
    /// Breaststroke.
    Breaststroke,
    /// Butterfly.
    Butterfly,
}

impl Stroke {
    /// The fixed presentation order for result tables and reports:
    /// Butterfly, Backstroke, Breaststroke, Freestyle.
    pub const DISPLAY_ORDER: [Self; 4] = [
        Self::Butterfly,
        Self::Backstroke,
        Self::Breaststroke,
        Self::Freestyle,
    ];

    /// Parses a stroke from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid stroke.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Freestyle" => Ok(Self::Freestyle),
            "Backstroke" => Ok(Self::Backstroke),
            "Breaststroke" => Ok(Self::Breaststroke),
            "Butterfly" => Ok(Self::Butterfly),
            _ => Err(DomainError::InvalidStroke(format!("Unknown stroke: {s}"))),
        }
    }

    /// Returns the string representation of this stroke.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Freestyle => "Freestyle",
            Self::Backstroke => "Backstroke",
            Self::Breaststroke => "Breaststroke",
            Self::Butterfly => "Butterfly",
        }
    }

    /// Returns this stroke's rank within [`Self::DISPLAY_ORDER`].
    #[must_use]
    pub const fn display_rank(&self) -> u8 {
        match self {
            Self::Butterfly => 0,
            Self::Backstroke => 1,
            Self::Breaststroke => 2,
            Self::Freestyle => 3,
        }
    }
}

impl std::fmt::Display for Stroke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a contested race distance.
///
/// Only the club's fixed set of distances is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Distance {
    /// The distance in meters.
    meters: u16,
}

impl Distance {
    /// The contested distances in meters.
    pub const CONTESTED_METERS: [u16; 7] = [25, 50, 100, 200, 400, 800, 1500];

    /// Creates a new `Distance`.
    ///
    /// # Arguments
    ///
    /// * `meters` - The distance in meters (must be a contested distance)
    ///
    /// # Errors
    ///
    /// Returns an error if the distance is not contested by the club.
    pub fn new(meters: u16) -> Result<Self, DomainError> {
        if Self::CONTESTED_METERS.contains(&meters) {
            Ok(Self { meters })
        } else {
            Err(DomainError::InvalidDistance { meters })
        }
    }

    /// Returns the distance in meters.
    #[must_use]
    pub const fn meters(&self) -> u16 {
        self.meters
    }
}

/// Represents an elapsed race time in minutes, seconds, and centiseconds.
///
/// The formatted representation is `MM:SS.cc` and the millisecond value is
/// always `minutes*60000 + seconds*1000 + centiseconds*10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwimTime {
    /// Whole minutes (0-59).
    minutes: u8,
    /// Whole seconds (0-59).
    seconds: u8,
    /// Centiseconds (0-99).
    centiseconds: u8,
}

impl SwimTime {
    /// Creates a new `SwimTime`.
    ///
    /// # Arguments
    ///
    /// * `minutes` - Whole minutes (0-59)
    /// * `seconds` - Whole seconds (0-59)
    /// * `centiseconds` - Centiseconds (0-99)
    ///
    /// # Errors
    ///
    /// Returns an error if any component is out of range.
    pub const fn new(minutes: u8, seconds: u8, centiseconds: u8) -> Result<Self, DomainError> {
        if minutes > 59 {
            return Err(DomainError::InvalidSwimTime("Minutes must be 0-59"));
        }
        if seconds > 59 {
            return Err(DomainError::InvalidSwimTime("Seconds must be 0-59"));
        }
        if centiseconds > 99 {
            return Err(DomainError::InvalidSwimTime("Centiseconds must be 0-99"));
        }
        Ok(Self {
            minutes,
            seconds,
            centiseconds,
        })
    }

    /// Parses a `MM:SS.cc` formatted time string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not in `MM:SS.cc` form or any
    /// component is out of range.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let parse_error = || DomainError::SwimTimeParseError {
            time_string: s.to_string(),
        };

        let (minutes_part, rest) = s.split_once(':').ok_or_else(parse_error)?;
        let (seconds_part, centis_part) = rest.split_once('.').ok_or_else(parse_error)?;

        let minutes: u8 = minutes_part.parse().map_err(|_| parse_error())?;
        let seconds: u8 = seconds_part.parse().map_err(|_| parse_error())?;
        let centiseconds: u8 = centis_part.parse().map_err(|_| parse_error())?;

        Self::new(minutes, seconds, centiseconds)
    }

    /// Returns the total elapsed time in milliseconds.
    #[must_use]
    pub fn total_ms(&self) -> u32 {
        u32::from(self.minutes) * 60_000
            + u32::from(self.seconds) * 1_000
            + u32::from(self.centiseconds) * 10
    }

    /// Returns the `MM:SS.cc` formatted representation.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{:02}:{:02}.{:02}",
            self.minutes, self.seconds, self.centiseconds
        )
    }

    /// Returns the whole minutes component.
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Returns the whole seconds component.
    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Returns the centiseconds component.
    #[must_use]
    pub const fn centiseconds(&self) -> u8 {
        self.centiseconds
    }
}

impl std::fmt::Display for SwimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Represents one timed performance at a competition or trial.
///
/// The athlete name, age, and age group are snapshots taken when the record
/// is entered. Edits recompute the time fields only; the snapshots describe
/// the athlete as they were on the event date and are never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Canonical identifier (opaque, stable, immutable).
    pub id: String,
    /// The athlete this record belongs to.
    pub athlete_id: String,
    /// Snapshot of the athlete's name at entry time.
    pub athlete_name: String,
    /// The competition or trial name.
    pub competition_name: String,
    /// Event date stored as `YYYY-MM-DD` text.
    pub event_date: String,
    /// The stroke swum.
    pub stroke: Stroke,
    /// The contested distance.
    pub distance: Distance,
    /// Elapsed time in integer milliseconds.
    pub time_ms: u32,
    /// Elapsed time formatted as `MM:SS.cc`.
    pub time_formatted: String,
    /// Snapshot of the athlete's age in the event year.
    pub age_at_event: i32,
    /// Snapshot of the athlete's age-group label in the event year.
    pub age_group_at_event: String,
    /// Identity of the operator who entered this record.
    pub recorded_by: String,
}
