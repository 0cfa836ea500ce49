// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::policy::AccountPolicyError;
use ksac_domain::DomainError;
use ksac_store::{AuthProviderError, StoreError};

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and store errors and represent the API
/// contract. Lower-layer errors are translated explicitly and never leaked
/// through the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A report or export matched no rows.
    EmptyReport,
    /// The backing store rejected an operation.
    Backend {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::EmptyReport => {
                write!(f, "No data matches the selected filters")
            }
            Self::Backend { message } => {
                write!(f, "Store error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<AccountPolicyError> for ApiError {
    fn from(err: AccountPolicyError) -> Self {
        match &err {
            AccountPolicyError::InvalidEmail => Self::InvalidInput {
                field: String::from("email"),
                message: err.to_string(),
            },
            AccountPolicyError::PasswordTooShort { .. } => Self::InvalidInput {
                field: String::from("password"),
                message: err.to_string(),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AthleteNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Athlete"),
                message: format!("Athlete '{id}' does not exist"),
            },
            StoreError::PerformanceRecordNotFound(id) => Self::ResourceNotFound {
                resource_type: String::from("Performance record"),
                message: format!("Performance record '{id}' does not exist"),
            },
            StoreError::UserNotFound(uid) => Self::ResourceNotFound {
                resource_type: String::from("User"),
                message: format!("User '{uid}' does not exist"),
            },
            StoreError::DuplicateKey(key) => Self::DomainRuleViolation {
                rule: String::from("unique_key"),
                message: format!("A document already exists for '{key}'"),
            },
            StoreError::Backend(message) => Self::Backend { message },
        }
    }
}

/// Translates an auth provider error into an API error.
///
/// The provider's error strings are pattern-matched into the specific user
/// messages the application shows; raw provider errors are never surfaced.
impl From<AuthProviderError> for ApiError {
    fn from(err: AuthProviderError) -> Self {
        match err {
            AuthProviderError::InvalidCredentials => Self::AuthenticationFailed {
                reason: String::from("Login failed. Check your email and password."),
            },
            AuthProviderError::EmailAlreadyRegistered(email) => Self::DomainRuleViolation {
                rule: String::from("unique_email"),
                message: format!("An account already exists for '{email}'"),
            },
            AuthProviderError::WeakPassword { min_length } => Self::InvalidInput {
                field: String::from("password"),
                message: format!("Password must be at least {min_length} characters"),
            },
            AuthProviderError::AccountNotFound(identity) => Self::ResourceNotFound {
                resource_type: String::from("Account"),
                message: format!("No account exists for '{identity}'"),
            },
            AuthProviderError::HashingFailed(message) => Self::Backend { message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DuplicateName { name } => ApiError::DomainRuleViolation {
            rule: String::from("unique_name"),
            message: format!("An athlete named '{name}' is already registered"),
        },
        DomainError::InvalidLevel(msg) => ApiError::InvalidInput {
            field: String::from("level"),
            message: msg.to_string(),
        },
        DomainError::InvalidGender(msg) => ApiError::InvalidInput {
            field: String::from("gender"),
            message: msg,
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidStroke(msg) => ApiError::InvalidInput {
            field: String::from("stroke"),
            message: msg,
        },
        DomainError::InvalidDistance { meters } => ApiError::InvalidInput {
            field: String::from("distance"),
            message: format!("Distance {meters}m is not a contested distance"),
        },
        DomainError::InvalidSwimTime(msg) => ApiError::InvalidInput {
            field: String::from("time"),
            message: msg.to_string(),
        },
        DomainError::SwimTimeParseError { time_string } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse swim time '{time_string}'"),
        },
        DomainError::InvalidAttendanceStatus(msg) | DomainError::InvalidPaymentStatus(msg) => {
            ApiError::InvalidInput {
                field: String::from("status"),
                message: msg,
            }
        }
        DomainError::InvalidPaymentMethod(msg) => ApiError::InvalidInput {
            field: String::from("method"),
            message: msg,
        },
        DomainError::InvalidAgeGroup(msg) => ApiError::InvalidInput {
            field: String::from("age_group"),
            message: msg,
        },
        DomainError::InvalidMonth { month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message: format!("Start date {start} must not be after end date {end}"),
        },
        DomainError::DateParseError { date_string } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}'"),
        },
    }
}
