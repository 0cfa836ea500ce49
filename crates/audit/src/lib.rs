// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use ksac_domain::Role;
use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is an authenticated user who initiates a change. The name and
/// role are stored alongside the identity so log entries remain readable
/// even after the account is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor (the auth identity).
    pub uid: String,
    /// The actor's display name at the time of the action.
    pub name: String,
    /// The actor's role at the time of the action.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `uid` - The unique identifier for this actor
    /// * `name` - The actor's display name
    /// * `role` - The actor's role
    #[must_use]
    pub const fn new(uid: String, name: String, role: Role) -> Self {
        Self { uid, name, role }
    }
}

/// An immutable activity-log entry.
///
/// Every user-visible action appends exactly one entry describing who did
/// what and when. Entries are append-only: the application never mutates or
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the action happened (ISO 8601, UTC).
    pub timestamp: String,
    /// The actor who performed the action.
    pub actor: Actor,
    /// A free-text description of the action.
    pub action: String,
}

impl ActivityEntry {
    /// Creates a new `ActivityEntry`.
    ///
    /// Once created, an entry is immutable.
    ///
    /// # Arguments
    ///
    /// * `timestamp` - When the action happened (ISO 8601, UTC)
    /// * `actor` - The actor who performed the action
    /// * `action` - A free-text description of the action
    #[must_use]
    pub const fn new(timestamp: String, actor: Actor, action: String) -> Self {
        Self {
            timestamp,
            actor,
            action,
        }
    }
}
