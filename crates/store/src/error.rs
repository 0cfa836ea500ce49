// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested athlete was not found.
    AthleteNotFound(String),
    /// The requested performance record was not found.
    PerformanceRecordNotFound(String),
    /// The requested user account was not found.
    UserNotFound(String),
    /// A document with the same key already exists.
    DuplicateKey(String),
    /// The backend rejected the operation.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AthleteNotFound(id) => write!(f, "Athlete not found: {id}"),
            Self::PerformanceRecordNotFound(id) => {
                write!(f, "Performance record not found: {id}")
            }
            Self::UserNotFound(uid) => write!(f, "User not found: {uid}"),
            Self::DuplicateKey(key) => write!(f, "Document already exists: {key}"),
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
