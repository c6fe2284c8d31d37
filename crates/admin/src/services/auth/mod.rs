//! Operator authentication service.
//!
//! A single operator account, configured as an email and an argon2 PHC hash.
//! The plaintext password never touches configuration or logs.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use order_desk_core::Email;

use crate::config::AuthConfig;

/// Minimum password length accepted by [`hash_password`].
const MIN_PASSWORD_LENGTH: usize = 8;

/// Verifies operator credentials.
#[derive(Clone)]
pub struct AuthService {
    email: Email,
    password_hash: SecretString,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl AuthService {
    /// Create the service from configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            email: config.email.clone(),
            password_hash: config.password_hash.clone(),
        }
    }

    /// Check submitted credentials.
    ///
    /// The password hash is always verified, even when the email does not
    /// match, so both failure modes take the same time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch, including a
    /// malformed email.
    pub fn verify(&self, email: &str, password: &str) -> Result<Email, AuthError> {
        let password_ok = verify_password(password, self.password_hash.expose_secret()).is_ok();
        let email_ok = Email::parse(email).is_ok_and(|e| e == self.email);

        if password_ok && email_ok {
            Ok(self.email.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id, for `ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` for short passwords and
/// `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    validate_password(password)?;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Whether `hash` is a well-formed PHC string.
#[must_use]
pub fn is_valid_password_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
