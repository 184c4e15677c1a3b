//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use blogicum_core::ports::{AuthError, PasswordService};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Argon2id password service with default parameters.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

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
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("correct horse battery").unwrap();

        assert!(service.verify("correct horse battery", &hash).unwrap());
        assert!(!service.verify("wrong horse battery", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let service = Argon2PasswordService::new();
        assert_ne!(
            service.hash("repeatable").unwrap(),
            service.hash("repeatable").unwrap()
        );
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = Argon2PasswordService::new().verify("pw", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
