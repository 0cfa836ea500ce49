// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a user account role.
///
/// Roles determine which views a user may navigate to and which operations
/// they may perform. Every role owns a fixed set of allowed views, checked
/// once at the navigation boundary rather than ad hoc in every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Administrators: full club management plus user-account and
    /// activity-log administration.
    #[serde(rename = "admin")]
    Admin,
    /// Coaches: club management (athletes, attendance, fees) and
    /// performance entry and analysis.
    #[serde(rename = "coach")]
    Coach,
    /// Athletes: self-service view of their own personal bests.
    #[serde(rename = "athlete")]
    Athlete,
    /// Parents: view of their children's personal bests.
    #[serde(rename = "parent")]
    Parent,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "coach" => Ok(Self::Coach),
            "athlete" => Ok(Self::Athlete),
            "parent" => Ok(Self::Parent),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    /// Converts this role to its stored wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coach => "coach",
            Self::Athlete => "athlete",
            Self::Parent => "parent",
        }
    }

    /// Returns the fixed set of views this role may navigate to.
    #[must_use]
    pub const fn views(&self) -> &'static [View] {
        match self {
            Self::Admin => &[
                View::Dashboard,
                View::Athletes,
                View::Attendance,
                View::Fees,
                View::PerformanceEntry,
                View::PerformanceAnalysis,
                View::PersonalBest,
                View::UserManagement,
                View::ActivityLog,
            ],
            Self::Coach => &[
                View::Dashboard,
                View::Athletes,
                View::Attendance,
                View::Fees,
                View::PerformanceEntry,
                View::PerformanceAnalysis,
                View::PersonalBest,
            ],
            Self::Athlete | Self::Parent => &[View::Dashboard, View::PersonalBest],
        }
    }

    /// Checks whether this role may navigate to a view.
    #[must_use]
    pub fn can_view(&self, view: View) -> bool {
        self.views().contains(&view)
    }
}

/// Represents a navigable view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    /// The role-specific landing dashboard.
    Dashboard,
    /// Athlete roster management.
    Athletes,
    /// Attendance sign-in sheets.
    Attendance,
    /// Monthly fee (SPP) tracking.
    Fees,
    /// Performance time entry.
    PerformanceEntry,
    /// Performance management and analysis.
    PerformanceAnalysis,
    /// Personal-best tables.
    PersonalBest,
    /// User account administration.
    UserManagement,
    /// The activity audit log.
    ActivityLog,
}

impl View {
    /// Returns the display name of this view.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Athletes => "Athletes",
            Self::Attendance => "Attendance",
            Self::Fees => "Fees",
            Self::PerformanceEntry => "Performance Entry",
            Self::PerformanceAnalysis => "Performance Analysis",
            Self::PersonalBest => "Personal Best",
            Self::UserManagement => "User Management",
            Self::ActivityLog => "Activity Log",
        }
    }
}
