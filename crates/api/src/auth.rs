// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use crate::activity::log_activity;
use crate::error::{ApiError, AuthError};
use ksac_audit::Actor;
use ksac_domain::Role;
use ksac_store::{AuthProvider, MemoryStore, SessionData, UserAccount};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};

/// An authenticated user with an associated role.
///
/// This is the session-scoped identity every operation receives. The
/// display name and role are loaded from the user profile at login and
/// carried along for authorization checks and activity attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The auth identity.
    pub uid: String,
    /// The user's display name.
    pub display_name: String,
    /// The user's role.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// # Arguments
    ///
    /// * `uid` - The auth identity
    /// * `display_name` - The user's display name
    /// * `role` - The user's role
    #[must_use]
    pub const fn new(uid: String, display_name: String, role: Role) -> Self {
        Self {
            uid,
            display_name,
            role,
        }
    }

    /// Converts this user into an audit Actor.
    ///
    /// This is used when recording activity entries to attribute actions to
    /// the authenticated user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.uid.clone(), self.display_name.clone(), self.role)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated user has permission to
/// perform a specific action based on their role. Checks happen once at the
/// operation boundary; handlers never re-derive permissions ad hoc.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a user may manage club data (athletes, attendance, fees,
    /// performance records).
    ///
    /// Admin and Coach users may manage club data.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is an athlete or parent.
    pub fn authorize_manage_club(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Admin | Role::Coach => Ok(()),
            Role::Athlete | Role::Parent => Err(AuthError::Unauthorized {
                action: String::from("manage_club"),
                required_role: String::from("Coach"),
            }),
        }
    }

    /// Checks if a user may delete an athlete.
    ///
    /// Only Admin users may delete athletes.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Admin role.
    pub fn authorize_delete_athlete(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Admin => Ok(()),
            Role::Coach | Role::Athlete | Role::Parent => Err(AuthError::Unauthorized {
                action: String::from("delete_athlete"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a user may administer user accounts.
    ///
    /// Only Admin users may administer accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Admin role.
    pub fn authorize_manage_users(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Admin => Ok(()),
            Role::Coach | Role::Athlete | Role::Parent => Err(AuthError::Unauthorized {
                action: String::from("manage_users"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a user may read the activity log.
    ///
    /// Only Admin users may read the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not have the Admin role.
    pub fn authorize_view_activity_log(user: &AuthenticatedUser) -> Result<(), AuthError> {
        match user.role {
            Role::Admin => Ok(()),
            Role::Coach | Role::Athlete | Role::Parent => Err(AuthError::Unauthorized {
                action: String::from("view_activity_log"),
                required_role: String::from("Admin"),
            }),
        }
    }
}

/// The result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// The opaque session token.
    pub session_token: String,
    /// The authenticated user.
    pub user: AuthenticatedUser,
}

/// Authentication service for session-based authentication.
pub struct SessionService;

impl SessionService {
    /// Session expiration duration.
    const SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user against the auth provider and creates a session.
    ///
    /// The sign-in result is joined against the `users` collection; an auth
    /// identity without a profile cannot log in because no role can be
    /// resolved for it.
    ///
    /// # Arguments
    ///
    /// * `store` - The document store
    /// * `provider` - The auth provider
    /// * `email` - The login email
    /// * `password` - The login password
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or no user profile
    /// exists for the identity.
    pub fn login(
        store: &mut MemoryStore,
        provider: &AuthProvider,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("credentials"),
                message: String::from("Email and password must not be empty"),
            });
        }

        let uid: String = provider.sign_in(email, password)?;

        let profile: UserAccount =
            store
                .user(&uid)
                .map_err(|_| ApiError::AuthenticationFailed {
                    reason: String::from(
                        "Your role is not configured. Contact an administrator.",
                    ),
                })?;

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_expiry(
            OffsetDateTime::now_utc() + Self::SESSION_EXPIRATION,
        )?;

        store.put_session(SessionData {
            token: session_token.clone(),
            uid: uid.clone(),
            expires_at,
        });

        let user: AuthenticatedUser =
            AuthenticatedUser::new(uid, profile.display_name, profile.role);

        log_activity(store, &user, "User logged into the system.");

        Ok(LoginResult {
            session_token,
            user,
        })
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// Expired sessions are deleted as a side effect.
    ///
    /// # Arguments
    ///
    /// * `store` - The document store
    /// * `session_token` - The token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired, or its user
    /// profile no longer exists.
    pub fn validate_session(
        store: &mut MemoryStore,
        session_token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData =
            store
                .session(session_token)
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Invalid session token"),
                })?;

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            store.delete_session(session_token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let profile: UserAccount =
            store
                .user(&session.uid)
                .map_err(|_| AuthError::AuthenticationFailed {
                    reason: String::from("User profile not found"),
                })?;

        Ok(AuthenticatedUser::new(
            session.uid,
            profile.display_name,
            profile.role,
        ))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `store` - The document store
    /// * `user` - The authenticated user logging out
    /// * `session_token` - The token to delete
    pub fn logout(store: &mut MemoryStore, user: &AuthenticatedUser, session_token: &str) {
        log_activity(store, user, "User logged out of the system.");
        store.delete_session(session_token);
    }

    /// Requests a password-reset email.
    ///
    /// The email is checked against the `users` collection first so the
    /// caller gets a specific message for unregistered addresses; only then
    /// is the provider asked to send the link.
    ///
    /// # Arguments
    ///
    /// * `store` - The document store
    /// * `provider` - The auth provider
    /// * `email` - The address to send the reset link to
    ///
    /// # Errors
    ///
    /// Returns an error if the email is empty, not registered in the
    /// system, or the provider rejects the request.
    pub fn request_password_reset(
        store: &MemoryStore,
        provider: &mut AuthProvider,
        email: &str,
    ) -> Result<(), ApiError> {
        if email.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("email"),
                message: String::from("Enter your email address"),
            });
        }

        if store.user_by_email(email).is_none() {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Email"),
                message: String::from("This email is not registered in the system"),
            });
        }

        provider.send_password_reset(email)?;

        Ok(())
    }

    /// Generates a session token.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Formats a session expiry timestamp.
    fn format_expiry(expires_at: OffsetDateTime) -> Result<String, ApiError> {
        expires_at
            .format(&Iso8601::DEFAULT)
            .map_err(|e| ApiError::Backend {
                message: format!("Failed to format session expiry: {e}"),
            })
    }
}
