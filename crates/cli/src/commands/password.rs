//! Operator password hashing.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the password on stdin
//! od-cli hash-password
//!
//! # Pass it directly (ends up in shell history)
//! od-cli hash-password --password 'correct horse battery staple'
//! ```
//!
//! The printed PHC string goes into `ADMIN_PASSWORD_HASH`.

use std::io::{BufRead, Write};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use order_desk_admin::services::{AuthError, hash_password};

/// Errors that can occur while hashing a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Reading the prompt or writing the hash failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The password was rejected or could not be hashed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Hash `password`, or a password read from stdin, and print the PHC string.
///
/// # Errors
///
/// Returns `PasswordError` if stdin cannot be read or the password is too weak.
pub fn hash(password: Option<String>) -> Result<(), PasswordError> {
    let password = match password {
        Some(password) => SecretString::from(password),
        None => prompt()?,
    };

    let hash = hash_password(password.expose_secret())?;
    tracing::info!("Set ADMIN_PASSWORD_HASH to the value below");

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{hash}")?;
    Ok(())
}

fn prompt() -> Result<SecretString, PasswordError> {
    let mut stderr = std::io::stderr().lock();
    write!(stderr, "Password: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(SecretString::from(line.trim_end_matches(['\r', '\n']).to_owned()))
}
