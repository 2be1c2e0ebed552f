//! Password hashing with Argon2id.
//!
//! The length policy lives here rather than in the HTTP layer, so every
//! caller of `hash` gets the same floor no matter which surface the
//! password arrived through.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use fable_core::ports::{AuthError, PasswordService};

/// Shortest password the service will hash.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Argon2id-backed password service with a minimum-length policy.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
    min_length: usize,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.chars().count() < self.min_length {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {} characters",
                self.min_length
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_rejects_wrong_password() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct horse battery").unwrap();

        assert!(service.verify("correct horse battery", &hash).unwrap());
        assert!(!service.verify("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn short_password_is_refused_before_hashing() {
        let service = Argon2PasswordService::new();

        let result = service.hash("short");

        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn equal_passwords_hash_to_different_strings() {
        let service = Argon2PasswordService::new();

        let first = service.hash("correct horse battery").unwrap();
        let second = service.hash("correct horse battery").unwrap();

        // Fresh salt per hash.
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_mismatch() {
        let service = Argon2PasswordService::new();

        assert!(service.verify("whatever", "not-a-phc-string").is_err());
    }
}
