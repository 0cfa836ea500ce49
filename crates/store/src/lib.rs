// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data access layer for the KSAC Club Management System.
//!
//! This crate models the two hosted collaborators the application talks to:
//!
//! - a collection-style document store holding the `athletes`,
//!   `attendance_records`, `spp_payments`, `performance_records`, `users`,
//!   `activity_logs`, and `sessions` collections, and
//! - an authentication provider keyed by email that owns credentials,
//!   password resets, and role claims.
//!
//! Both collaborators are provided as in-memory backends. The store enforces
//! no schema of its own; the application layers enforce the domain
//! invariants before writing.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod cache;
mod documents;
mod error;
mod memory;

pub use auth::{AuthProvider, AuthProviderError, MIN_PASSWORD_LENGTH};
pub use cache::RosterCache;
pub use documents::{
    AttendanceDocument, FeeDocument, PaymentDetail, PerformanceUpdate, SessionData, UserAccount,
};
pub use error::StoreError;
pub use memory::MemoryStore;
