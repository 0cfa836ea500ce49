// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Activity-log operations.

use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::clock::now_iso8601;
use crate::error::ApiError;
use ksac_audit::ActivityEntry;
use ksac_store::MemoryStore;
use tracing::warn;

/// Default number of entries shown by the activity log view.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 100;

/// Appends an activity-log entry describing an action the actor performed.
///
/// The append is best-effort: a failed log write is swallowed with a
/// warning so it never blocks the primary action it describes.
pub fn log_activity(store: &mut MemoryStore, actor: &AuthenticatedUser, action: &str) {
    let entry: ActivityEntry = ActivityEntry::new(
        now_iso8601(),
        actor.to_audit_actor(),
        action.to_string(),
    );

    if let Err(err) = store.append_activity(entry) {
        warn!(error = %err, action = %action, "Failed to write activity log entry");
    }
}

/// Returns the most recent activity entries, newest first.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be an admin)
/// * `limit` - Maximum number of entries to return
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
pub fn recent_activity(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    limit: usize,
) -> Result<Vec<ActivityEntry>, ApiError> {
    AuthorizationService::authorize_view_activity_log(actor)?;

    Ok(store.recent_activity(limit))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ksac_domain::Role;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(
            String::from("uid-admin"),
            String::from("Site Admin"),
            Role::Admin,
        )
    }

    fn coach() -> AuthenticatedUser {
        AuthenticatedUser::new(
            String::from("uid-coach"),
            String::from("Head Coach"),
            Role::Coach,
        )
    }

    #[test]
    fn test_logged_actions_are_attributed() {
        let mut store: MemoryStore = MemoryStore::new();
        log_activity(&mut store, &coach(), "Athlete 'Jane Doe' added.");

        let entries: Vec<ActivityEntry> = recent_activity(&store, &admin(), 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor.uid, "uid-coach");
        assert_eq!(entries[0].actor.name, "Head Coach");
        assert_eq!(entries[0].action, "Athlete 'Jane Doe' added.");
    }

    #[test]
    fn test_failed_log_write_is_swallowed() {
        let mut store: MemoryStore = MemoryStore::new();
        store.set_fail_activity_appends(true);

        // Must not panic or surface an error.
        log_activity(&mut store, &coach(), "doomed entry");

        store.set_fail_activity_appends(false);
        assert!(recent_activity(&store, &admin(), 10).unwrap().is_empty());
    }

    #[test]
    fn test_activity_log_is_admin_only() {
        let store: MemoryStore = MemoryStore::new();
        let result = recent_activity(&store, &coach(), 10);
        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    }

    #[test]
    fn test_limit_is_respected() {
        let mut store: MemoryStore = MemoryStore::new();
        for i in 0..5 {
            log_activity(&mut store, &admin(), &format!("action {i}"));
        }

        let entries: Vec<ActivityEntry> = recent_activity(&store, &admin(), 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "action 4");
    }
}
