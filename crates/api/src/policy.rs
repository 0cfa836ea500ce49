// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account field policy validation.
//!
//! This module enforces the email and password requirements for user
//! accounts before anything reaches the auth provider.

use ksac_store::MIN_PASSWORD_LENGTH;
use thiserror::Error;

/// Account policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountPolicyError {
    /// Email does not look like an address.
    #[error("Email address is not valid")]
    InvalidEmail,

    /// Password is too short.
    #[error("Password must be at least {min_length} characters")]
    PasswordTooShort {
        /// The minimum accepted length.
        min_length: usize,
    },
}

/// Validates the shape of an email address.
///
/// The check mirrors the form-level rule the club has always used: a
/// non-empty local part, exactly one `@`, and a domain containing a dot.
///
/// # Errors
///
/// Returns an error if the email does not match that shape.
pub fn validate_email(email: &str) -> Result<(), AccountPolicyError> {
    let trimmed: &str = email.trim();

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(AccountPolicyError::InvalidEmail);
    };

    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || trimmed.chars().any(char::is_whitespace)
    {
        return Err(AccountPolicyError::InvalidEmail);
    }

    Ok(())
}

/// Validates a new password against the minimum-length policy.
///
/// # Errors
///
/// Returns an error if the password is shorter than the provider minimum.
pub fn validate_password(password: &str) -> Result<(), AccountPolicyError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountPolicyError::PasswordTooShort {
            min_length: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "coach@example.com",
            "a.b@example.co.id",
            "  padded@example.com  ",
        ] {
            assert!(validate_email(email).is_ok(), "expected ok for {email:?}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@nodot",
            "user@@example.com",
            "user@.com",
            "user@domain.",
            "user name@example.com",
        ] {
            assert_eq!(
                validate_email(email),
                Err(AccountPolicyError::InvalidEmail),
                "expected rejection for {email:?}"
            );
        }
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            validate_password("12345"),
            Err(AccountPolicyError::PasswordTooShort { min_length: 6 })
        );
    }
}
