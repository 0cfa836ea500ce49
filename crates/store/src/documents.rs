// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ksac_domain::{AttendanceStatus, Distance, PaymentMethod, PaymentStatus, Role, Stroke};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's attendance document, keyed by its date.
///
/// The records map is sparse: athletes without an explicit entry default to
/// present when the sheet is rendered. Saves merge into the map so edits to
/// different athletes on the same day never clobber each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDocument {
    /// The training date as `YYYY-MM-DD`.
    pub date: String,
    /// Status per athlete identifier.
    pub records: BTreeMap<String, AttendanceStatus>,
    /// Display name of the operator who last saved the sheet.
    pub recorded_by: String,
}

/// Payment detail for one athlete in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetail {
    /// Whether the fee has been settled.
    pub status: PaymentStatus,
    /// Amount paid, in rupiah.
    pub amount: u64,
    /// Payment date as `YYYY-MM-DD`.
    pub payment_date: String,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// Optional free-text notes.
    pub notes: String,
    /// Display name of the operator who recorded the payment.
    pub updated_by: String,
    /// When the payment was recorded (ISO 8601, UTC).
    pub updated_at: String,
}

/// One month's fee document, keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDocument {
    /// The month key as `YYYY-MM`.
    pub month_key: String,
    /// Payment detail per athlete identifier. Sparse: athletes without an
    /// entry are outstanding by default.
    pub payments: BTreeMap<String, PaymentDetail>,
}

/// A user account profile stored in the `users` collection.
///
/// The document identifier equals the auth identity (`uid`). Parent accounts
/// carry their children directly; athlete accounts are linked through the
/// back-reference stored on the athlete record instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// The auth identity this profile belongs to.
    pub uid: String,
    /// The user's display name.
    pub display_name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// Athlete identifiers for parent accounts. Empty for other roles.
    pub child_athlete_ids: Vec<String>,
}

/// A login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// The opaque session token.
    pub token: String,
    /// The auth identity the session belongs to.
    pub uid: String,
    /// Expiry timestamp (ISO 8601, UTC).
    pub expires_at: String,
}

/// The editable fields of a performance record.
///
/// The athlete linkage and the age/age-group snapshots are deliberately
/// absent: edits recompute the time and event fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceUpdate {
    /// The competition or trial name.
    pub competition_name: String,
    /// Event date as `YYYY-MM-DD`.
    pub event_date: String,
    /// The stroke swum.
    pub stroke: Stroke,
    /// The contested distance.
    pub distance: Distance,
    /// Elapsed time in integer milliseconds.
    pub time_ms: u32,
    /// Elapsed time formatted as `MM:SS.cc`.
    pub time_formatted: String,
}
