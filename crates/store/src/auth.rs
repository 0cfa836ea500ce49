// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The hosted authentication provider seam.
//!
//! Accounts are keyed by email and own the credential material; the
//! application never sees password hashes. Role claims are mirrored here so
//! the provider stays authoritative for authorization metadata the same way
//! the hosted service is.

use ksac_domain::Role;
use std::collections::BTreeMap;
use tracing::debug;

/// Minimum password length the provider accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors returned by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthProviderError {
    /// The email/password combination is wrong. The provider does not say
    /// which half failed.
    InvalidCredentials,
    /// An account already exists for the email.
    EmailAlreadyRegistered(String),
    /// The password does not meet the provider's minimum requirements.
    WeakPassword {
        /// The minimum accepted length.
        min_length: usize,
    },
    /// No account exists for the email or identity.
    AccountNotFound(String),
    /// Password hashing failed.
    HashingFailed(String),
}

impl std::fmt::Display for AuthProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::EmailAlreadyRegistered(email) => {
                write!(f, "An account already exists for '{email}'")
            }
            Self::WeakPassword { min_length } => {
                write!(f, "Password must be at least {min_length} characters")
            }
            Self::AccountNotFound(identity) => write!(f, "Account not found: {identity}"),
            Self::HashingFailed(msg) => write!(f, "Password hashing failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthProviderError {}

/// One provider-side account.
#[derive(Debug, Clone)]
struct ProviderAccount {
    /// The auth identity.
    uid: String,
    /// The account email (stored lowercased).
    email: String,
    /// The bcrypt password hash.
    password_hash: String,
    /// The mirrored role claim, if one has been set.
    role_claim: Option<Role>,
}

/// An in-memory authentication provider.
#[derive(Debug, Default)]
pub struct AuthProvider {
    /// Accounts keyed by lowercased email.
    accounts: BTreeMap<String, ProviderAccount>,
    /// Emails that have been sent a password-reset link.
    reset_outbox: Vec<String>,
    /// Monotonic counter backing identity allocation.
    next_uid: u64,
}

impl AuthProvider {
    /// Creates a new empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account and returns the new auth identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered, the password is
    /// below [`MIN_PASSWORD_LENGTH`], or hashing fails.
    pub fn create_account(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<String, AuthProviderError> {
        let key: String = email.to_lowercase();

        if self.accounts.contains_key(&key) {
            return Err(AuthProviderError::EmailAlreadyRegistered(key));
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthProviderError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }

        let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthProviderError::HashingFailed(e.to_string()))?;

        self.next_uid += 1;
        let uid: String = format!("uid-{}", self.next_uid);

        debug!(uid = %uid, "Created auth account");
        self.accounts.insert(
            key.clone(),
            ProviderAccount {
                uid: uid.clone(),
                email: key,
                role_claim: None,
                password_hash,
            },
        );

        Ok(uid)
    }

    /// Signs in with email and password and returns the auth identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::InvalidCredentials`] for an unknown
    /// email as well as for a wrong password.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthProviderError> {
        let account: &ProviderAccount = self
            .accounts
            .get(&email.to_lowercase())
            .ok_or(AuthProviderError::InvalidCredentials)?;

        let verified: bool = bcrypt::verify(password, &account.password_hash)
            .map_err(|_| AuthProviderError::InvalidCredentials)?;

        if verified {
            Ok(account.uid.clone())
        } else {
            Err(AuthProviderError::InvalidCredentials)
        }
    }

    /// Sends a password-reset link to the email.
    ///
    /// # Errors
    ///
    /// Returns an error if no account exists for the email.
    pub fn send_password_reset(&mut self, email: &str) -> Result<(), AuthProviderError> {
        let key: String = email.to_lowercase();
        if !self.accounts.contains_key(&key) {
            return Err(AuthProviderError::AccountNotFound(key));
        }
        self.reset_outbox.push(key);
        Ok(())
    }

    /// Sets the role claim on an account.
    ///
    /// # Errors
    ///
    /// Returns an error if no account exists for the identity.
    pub fn set_role_claim(&mut self, uid: &str, role: Role) -> Result<(), AuthProviderError> {
        let account: &mut ProviderAccount = self
            .accounts
            .values_mut()
            .find(|account| account.uid == uid)
            .ok_or_else(|| AuthProviderError::AccountNotFound(uid.to_string()))?;

        account.role_claim = Some(role);
        Ok(())
    }

    /// Returns the role claim on an account, if one has been set.
    ///
    /// # Errors
    ///
    /// Returns an error if no account exists for the identity.
    pub fn role_claim(&self, uid: &str) -> Result<Option<Role>, AuthProviderError> {
        self.accounts
            .values()
            .find(|account| account.uid == uid)
            .map(|account| account.role_claim)
            .ok_or_else(|| AuthProviderError::AccountNotFound(uid.to_string()))
    }

    /// Deletes an account by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if no account exists for the identity.
    pub fn delete_account(&mut self, uid: &str) -> Result<(), AuthProviderError> {
        let email: String = self
            .accounts
            .values()
            .find(|account| account.uid == uid)
            .map(|account| account.email.clone())
            .ok_or_else(|| AuthProviderError::AccountNotFound(uid.to_string()))?;

        self.accounts.remove(&email);
        Ok(())
    }

    /// Checks whether an account exists for the email.
    #[must_use]
    pub fn account_exists(&self, email: &str) -> bool {
        self.accounts.contains_key(&email.to_lowercase())
    }

    /// Returns the emails that have been sent a reset link.
    #[must_use]
    pub fn reset_outbox(&self) -> &[String] {
        &self.reset_outbox
    }
}
