// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Represents a training level classification.
///
/// Levels are domain constants numbered 1 through 5.
/// Every athlete has exactly one level assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level {
    /// The level number (1-5).
    number: u8,
}

impl Level {
    /// Creates a new `Level`.
    ///
    /// # Arguments
    ///
    /// * `number` - The level number (must be between 1 and 5 inclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the level number is not in the range 1-5.
    pub const fn new(number: u8) -> Result<Self, DomainError> {
        if number >= 1 && number <= 5 {
            Ok(Self { number })
        } else {
            Err(DomainError::InvalidLevel(
                "Level number must be between 1 and 5",
            ))
        }
    }

    /// Returns the level number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }
}

/// Represents an athlete's gender classification.
///
/// The club registers athletes in two fixed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Boys' category.
    Boy,
    /// Girls' category.
    Girl,
}

impl Gender {
    /// Parses a gender from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid gender.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Boy" => Ok(Self::Boy),
            "Girl" => Ok(Self::Girl),
            _ => Err(DomainError::InvalidGender(format!("Unknown gender: {s}"))),
        }
    }

    /// Returns the string representation of this gender.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boy => "Boy",
            Self::Girl => "Girl",
        }
    }
}

/// Represents a single day's attendance status for one athlete.
///
/// The stored wire values are the Indonesian labels used throughout the
/// club's historical records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Present at training ("Hadir").
    #[serde(rename = "Hadir")]
    Present,
    /// Excused absence ("Izin").
    #[serde(rename = "Izin")]
    Excused,
    /// Absent due to illness ("Sakit").
    #[serde(rename = "Sakit")]
    Sick,
    /// Unexcused absence ("Alpa").
    #[serde(rename = "Alpa")]
    Absent,
}

impl AttendanceStatus {
    /// All attendance statuses in display order.
    pub const ALL: [Self; 4] = [Self::Present, Self::Excused, Self::Sick, Self::Absent];

    /// Parses an attendance status from its stored wire value.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Hadir" => Ok(Self::Present),
            "Izin" => Ok(Self::Excused),
            "Sakit" => Ok(Self::Sick),
            "Alpa" => Ok(Self::Absent),
            _ => Err(DomainError::InvalidAttendanceStatus(format!(
                "Unknown attendance status: {s}"
            ))),
        }
    }

    /// Returns the stored wire value of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Hadir",
            Self::Excused => "Izin",
            Self::Sick => "Sakit",
            Self::Absent => "Alpa",
        }
    }
}

/// Represents the payment state of a monthly fee (SPP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Fee has been paid ("Lunas").
    #[serde(rename = "Lunas")]
    Paid,
    /// Fee is outstanding ("Belum Lunas").
    #[serde(rename = "Belum Lunas")]
    Unpaid,
}

impl PaymentStatus {
    /// Parses a payment status from its stored wire value.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Lunas" => Ok(Self::Paid),
            "Belum Lunas" => Ok(Self::Unpaid),
            _ => Err(DomainError::InvalidPaymentStatus(format!(
                "Unknown payment status: {s}"
            ))),
        }
    }

    /// Returns the stored wire value of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Lunas",
            Self::Unpaid => "Belum Lunas",
        }
    }
}

/// Represents how a fee payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank transfer.
    Transfer,
    /// Cash payment ("Tunai").
    #[serde(rename = "Tunai")]
    Cash,
    /// QRIS payment.
    #[serde(rename = "QRIS")]
    Qris,
}

impl PaymentMethod {
    /// Parses a payment method from its stored wire value.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid method.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Transfer" => Ok(Self::Transfer),
            "Tunai" => Ok(Self::Cash),
            "QRIS" => Ok(Self::Qris),
            _ => Err(DomainError::InvalidPaymentMethod(format!(
                "Unknown payment method: {s}"
            ))),
        }
    }

    /// Returns the stored wire value of this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::Cash => "Tunai",
            Self::Qris => "QRIS",
        }
    }
}

/// Represents a registered athlete.
///
/// `id` is the canonical identifier assigned by the store. The
/// `linked_account_id` back-reference binds the athlete to a user account
/// with the athlete role and is maintained by the account-update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Canonical identifier (opaque, stable, immutable).
    pub id: String,
    /// The athlete's full name (unique case-insensitively).
    pub name: String,
    /// Date of birth stored as `YYYY-MM-DD` text.
    pub date_of_birth: String,
    /// The athlete's training level.
    pub level: Level,
    /// The athlete's gender category.
    pub gender: Gender,
    /// Back-reference to the linked user account, if any.
    pub linked_account_id: Option<String>,
}

impl Athlete {
    /// Creates a new `Athlete`.
    ///
    /// # Arguments
    ///
    /// * `id` - The canonical identifier
    /// * `name` - The athlete's full name
    /// * `date_of_birth` - Date of birth as `YYYY-MM-DD`
    /// * `level` - The athlete's training level
    /// * `gender` - The athlete's gender category
    #[must_use]
    pub const fn new(
        id: String,
        name: String,
        date_of_birth: String,
        level: Level,
        gender: Gender,
    ) -> Self {
        Self {
            id,
            name,
            date_of_birth,
            level,
            gender,
            linked_account_id: None,
        }
    }
}
