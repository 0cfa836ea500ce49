// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-session view state.
//!
//! Navigation selection, pagination, and pending-delete confirmations are
//! carried in one explicit, serializable object scoped to a session instead
//! of ambient mutable storage.

use crate::error::ApiError;
use ksac_domain::{Role, View};
use serde::{Deserialize, Serialize};

/// The view state of one user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionViewState {
    /// The currently selected view.
    pub active_view: View,
    /// The current page of the active list view (1-based).
    pub page: usize,
    /// Athlete identifier awaiting delete confirmation, if any.
    pub pending_athlete_delete: Option<String>,
    /// Performance record identifier awaiting delete confirmation, if any.
    pub pending_performance_delete: Option<String>,
    /// User identity awaiting delete confirmation, if any.
    pub pending_user_delete: Option<String>,
}

impl SessionViewState {
    /// Creates the initial view state for a fresh session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active_view: View::Dashboard,
            page: 1,
            pending_athlete_delete: None,
            pending_performance_delete: None,
            pending_user_delete: None,
        }
    }

    /// Navigates to a view, enforcing the role's fixed view set.
    ///
    /// Navigation resets pagination and abandons pending confirmations.
    ///
    /// # Errors
    ///
    /// Returns an error if the role may not access the view.
    pub fn navigate(&mut self, role: Role, view: View) -> Result<(), ApiError> {
        if !role.can_view(view) {
            return Err(ApiError::Unauthorized {
                action: format!("view {}", view.as_str()),
                required_role: String::from("a role with access to this view"),
            });
        }

        self.active_view = view;
        self.page = 1;
        self.pending_athlete_delete = None;
        self.pending_performance_delete = None;
        self.pending_user_delete = None;

        Ok(())
    }
}

impl Default for SessionViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the navigation menu for a role.
#[must_use]
pub fn navigation(role: Role) -> Vec<View> {
    role.views().to_vec()
}
