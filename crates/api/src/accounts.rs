// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account administration and account-athlete linkage maintenance.
//!
//! The athlete back-reference is a manually maintained bidirectional link
//! with no referential-integrity help from the store. Every account write
//! that can move the link goes through [`maintain_athlete_link`], and
//! [`check_linkage_consistency`] lets operators detect drift.

use crate::activity::log_activity;
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_domain_error};
use crate::policy::{validate_email, validate_password};
use ksac_domain::{Athlete, Role, validate_athlete_name};
use ksac_store::{AuthProvider, MemoryStore, UserAccount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

/// Request to create a new user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// The user's display name.
    pub display_name: String,
    /// The login email.
    pub email: String,
    /// The initial password.
    pub password: String,
    /// The role wire value (`admin`, `coach`, `athlete`, `parent`).
    pub role: String,
    /// Children for parent accounts.
    pub child_athlete_ids: Vec<String>,
    /// The athlete to link for athlete accounts.
    pub linked_athlete_id: Option<String>,
}

/// Request to update an existing user account.
///
/// The email is immutable; it identifies the account at the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// The user's display name.
    pub display_name: String,
    /// The role wire value.
    pub role: String,
    /// Children for parent accounts.
    pub child_athlete_ids: Vec<String>,
    /// The athlete to link for athlete accounts.
    pub linked_athlete_id: Option<String>,
}

/// One detected inconsistency between an athlete back-reference and the
/// accounts collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkageIssue {
    /// The athlete carrying the suspect back-reference.
    pub athlete_id: String,
    /// The athlete's name.
    pub athlete_name: String,
    /// What is wrong with the link.
    pub description: String,
}

/// Validates the role-specific linkage fields of a create/update request.
fn validate_linkage(
    store: &MemoryStore,
    role: Role,
    child_athlete_ids: &[String],
    linked_athlete_id: Option<&str>,
) -> Result<(), ApiError> {
    match role {
        Role::Parent => {
            if child_athlete_ids.is_empty() {
                return Err(ApiError::InvalidInput {
                    field: String::from("child_athlete_ids"),
                    message: String::from("A parent account must link at least one athlete"),
                });
            }
            for athlete_id in child_athlete_ids {
                store.athlete(athlete_id)?;
            }
        }
        Role::Athlete => {
            let athlete_id: &str = linked_athlete_id.ok_or_else(|| ApiError::InvalidInput {
                field: String::from("linked_athlete_id"),
                message: String::from("An athlete account must link an athlete record"),
            })?;
            store.athlete(athlete_id)?;
        }
        Role::Admin | Role::Coach => {}
    }
    Ok(())
}

/// Moves the athlete back-reference for one account.
///
/// Exactly one athlete may reference the account afterwards:
/// - the previously linked athlete (if different) is cleared,
/// - the new target (if any) is set.
///
/// Passing `None` as the target clears the link entirely, which is what a
/// role change away from athlete must do.
fn maintain_athlete_link(
    store: &mut MemoryStore,
    account_uid: &str,
    new_target: Option<&str>,
) -> Result<(), ApiError> {
    // Validate the target before touching anything so a rejected relink
    // leaves the existing link in place.
    if let Some(target) = new_target {
        let athlete: Athlete = store.athlete(target)?;
        if athlete
            .linked_account_id
            .as_deref()
            .is_some_and(|linked| linked != account_uid)
        {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("athlete_already_linked"),
                message: format!(
                    "Athlete '{}' is already linked to another account",
                    athlete.name
                ),
            });
        }
    }

    let previous: Option<Athlete> = store.athlete_by_linked_account(account_uid);
    if let Some(previous) = &previous
        && Some(previous.id.as_str()) != new_target
    {
        store.set_linked_account(&previous.id, None)?;
    }

    if let Some(target) = new_target {
        store.set_linked_account(target, Some(account_uid.to_string()))?;
    }

    Ok(())
}

/// Lists all user accounts.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
pub fn list_users(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
) -> Result<Vec<UserAccount>, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;
    Ok(store.all_users())
}

/// Lists athletes without a linked account, for the athlete-role picker.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
pub fn unlinked_athletes(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
) -> Result<Vec<Athlete>, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;
    Ok(store.unlinked_athletes())
}

/// Creates a user account: auth identity, role claim, profile, and (for
/// athlete accounts) the athlete back-reference.
///
/// All validation happens before the auth identity is created.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, any field is
/// invalid, the email is already registered, or the linkage rules are
/// violated.
pub fn create_user(
    store: &mut MemoryStore,
    provider: &mut AuthProvider,
    actor: &AuthenticatedUser,
    request: CreateUserRequest,
) -> Result<UserAccount, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let display_name: String = validate_athlete_name(&request.display_name)
        .map_err(translate_domain_error)
        .map_err(|err| match err {
            ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
                field: String::from("display_name"),
                message,
            },
            other => other,
        })?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;
    let email: String = request.email.trim().to_lowercase();
    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;

    validate_linkage(
        store,
        role,
        &request.child_athlete_ids,
        request.linked_athlete_id.as_deref(),
    )?;

    if role == Role::Athlete
        && let Some(athlete_id) = request.linked_athlete_id.as_deref()
    {
        let athlete: Athlete = store.athlete(athlete_id)?;
        if athlete.linked_account_id.is_some() {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("athlete_already_linked"),
                message: format!(
                    "Athlete '{}' is already linked to another account",
                    athlete.name
                ),
            });
        }
    }

    let uid: String = provider.create_account(&email, &request.password)?;
    provider.set_role_claim(&uid, role)?;

    let account: UserAccount = UserAccount {
        uid: uid.clone(),
        display_name: display_name.clone(),
        email,
        role,
        child_athlete_ids: if role == Role::Parent {
            request.child_athlete_ids
        } else {
            Vec::new()
        },
    };
    store.insert_user(account.clone())?;

    if role == Role::Athlete {
        maintain_athlete_link(store, &uid, request.linked_athlete_id.as_deref())?;
    }

    log_activity(
        store,
        actor,
        &format!("User '{display_name}' ({role}) created."),
    );

    Ok(account)
}

/// Updates a user account, maintaining the athlete back-reference.
///
/// When the role moves to `athlete`, the link is moved to the requested
/// athlete (clearing any previous holder of the link). When the role moves
/// away from `athlete`, the link is cleared. The role claim at the auth
/// provider is kept in sync.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the account does
/// not exist, any field is invalid, or the linkage rules are violated.
pub fn update_user(
    store: &mut MemoryStore,
    provider: &mut AuthProvider,
    actor: &AuthenticatedUser,
    uid: &str,
    request: UpdateUserRequest,
) -> Result<UserAccount, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let existing: UserAccount = store.user(uid)?;

    let display_name: String = validate_athlete_name(&request.display_name)
        .map_err(translate_domain_error)
        .map_err(|err| match err {
            ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
                field: String::from("display_name"),
                message,
            },
            other => other,
        })?;
    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;

    validate_linkage(
        store,
        role,
        &request.child_athlete_ids,
        request.linked_athlete_id.as_deref(),
    )?;

    let link_target: Option<&str> = if role == Role::Athlete {
        request.linked_athlete_id.as_deref()
    } else {
        None
    };
    maintain_athlete_link(store, uid, link_target)?;

    if let Err(err) = provider.set_role_claim(uid, role) {
        // The profile is still updated; the claim is resynced by the next
        // consistency pass.
        warn!(error = %err, uid = %uid, "Failed to sync role claim");
    }

    let account: UserAccount = UserAccount {
        uid: existing.uid,
        display_name: display_name.clone(),
        email: existing.email,
        role,
        child_athlete_ids: if role == Role::Parent {
            request.child_athlete_ids
        } else {
            Vec::new()
        },
    };
    store.update_user(account.clone())?;

    log_activity(
        store,
        actor,
        &format!("User '{display_name}' updated ({role})."),
    );

    Ok(account)
}

/// Deletes a user account: the auth identity first, then the profile.
///
/// The two deletes are not atomic. A missing auth identity is tolerated so
/// a previously half-failed delete can be completed; any other provider
/// failure aborts before the profile is touched.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, tries to delete
/// their own account, or the account does not exist.
pub fn delete_user(
    store: &mut MemoryStore,
    provider: &mut AuthProvider,
    actor: &AuthenticatedUser,
    uid: &str,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    if uid == actor.uid {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("self_delete"),
            message: String::from("You cannot delete your own account"),
        });
    }

    let account: UserAccount = store.user(uid)?;

    match provider.delete_account(uid) {
        Ok(()) => {}
        Err(ksac_store::AuthProviderError::AccountNotFound(_)) => {
            warn!(uid = %uid, "Auth identity already gone; deleting profile only");
        }
        Err(err) => return Err(err.into()),
    }

    maintain_athlete_link(store, uid, None)?;
    store.delete_user(uid)?;

    log_activity(
        store,
        actor,
        &format!("User '{}' deleted.", account.display_name),
    );

    Ok(())
}

/// Scans for drift between athlete back-references and the accounts
/// collection.
///
/// Reported issues: a back-reference to a missing account, a back-reference
/// to an account whose role is not `athlete`, and two athletes claiming the
/// same account.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
#[allow(clippy::option_if_let_else)]
pub fn check_linkage_consistency(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
) -> Result<Vec<LinkageIssue>, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let mut issues: Vec<LinkageIssue> = Vec::new();
    let mut claims: BTreeMap<String, String> = BTreeMap::new();

    for athlete in store.athletes_by_name() {
        let Some(account_uid) = &athlete.linked_account_id else {
            continue;
        };

        match store.user(account_uid) {
            Err(_) => issues.push(LinkageIssue {
                athlete_id: athlete.id.clone(),
                athlete_name: athlete.name.clone(),
                description: format!("References missing account '{account_uid}'"),
            }),
            Ok(account) if account.role != Role::Athlete => issues.push(LinkageIssue {
                athlete_id: athlete.id.clone(),
                athlete_name: athlete.name.clone(),
                description: format!(
                    "References account '{account_uid}' whose role is {}",
                    account.role
                ),
            }),
            Ok(_) => {}
        }

        if let Some(other_name) = claims.get(account_uid) {
            issues.push(LinkageIssue {
                athlete_id: athlete.id.clone(),
                athlete_name: athlete.name.clone(),
                description: format!(
                    "Account '{account_uid}' is also claimed by athlete '{other_name}'"
                ),
            });
        } else {
            claims.insert(account_uid.clone(), athlete.name.clone());
        }
    }

    Ok(issues)
}
