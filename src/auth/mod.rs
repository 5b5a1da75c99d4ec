//! Basic auth credential checking.
//!
//! Credentials are username → Argon2 PHC hash pairs. Stores are read-only
//! after startup and shared across requests.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored hash for user '{0}' is not a valid PHC string")]
    InvalidHash(String),

    #[error("No API credentials configured; set AUTH_PASSWORD, AUTH_PASSWORD_HASH or AUTH_USERS")]
    NoCredentials,
}

/// Checks Basic auth credentials; returns the authenticated username
pub trait CredentialStore: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<String>;
}

/// Fixed username → hash mapping
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    users: Vec<(String, String)>,
}

impl StaticCredentials {
    /// Build from username/PHC-hash pairs, rejecting hashes that do not parse
    pub fn new(users: Vec<(String, String)>) -> Result<Self, AuthError> {
        for (username, hash) in &users {
            PasswordHash::new(hash).map_err(|_| AuthError::InvalidHash(username.clone()))?;
        }
        Ok(Self { users })
    }

    /// `users` wins, then a precomputed hash, then a plain password hashed now
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.users.is_empty() {
            return Self::new(config.users.clone());
        }

        let hash = match (&config.password_hash, &config.password) {
            (Some(hash), _) => hash.clone(),
            (None, Some(password)) => hash_password(password)?,
            (None, None) => return Err(AuthError::NoCredentials),
        };

        Self::new(vec![(config.username.clone(), hash)])
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|(name, _)| name.as_str())
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<String> {
        // Scan every entry so lookup time does not depend on the position of a match
        let mut matched: Option<&(String, String)> = None;
        for entry in &self.users {
            let same: bool = entry.0.as_bytes().ct_eq(username.as_bytes()).into();
            if same && matched.is_none() {
                matched = Some(entry);
            }
        }

        match matched {
            Some((name, hash)) => verify_password(password, hash).then(|| name.clone()),
            None => {
                // Unknown users still pay for one verification
                if let Some((_, hash)) = self.users.first() {
                    let _ = verify_password(password, hash);
                }
                None
            }
        }
    }
}

/// Hash a password using Argon2id with a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Verify a password against a PHC hash; malformed hashes never verify
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
