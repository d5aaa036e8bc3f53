//! One-way password hashing for the deployment login

use crate::error::{Result, WizardError};
use sha_crypt::{sha512_simple, Sha512Params};

const SHA512_ROUNDS: usize = 5_000;

/// Produces a salted one-way hash of a plaintext password
pub trait PasswordHasher {
    fn hash(&self, password: &str) -> Result<String>;
}

/// SHA-512 crypt (`$6$salt$hash`), a fresh random salt on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct ShaCryptHasher;

impl PasswordHasher for ShaCryptHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let params = Sha512Params::new(SHA512_ROUNDS)
            .map_err(|e| WizardError::PasswordHash(format!("{:?}", e)))?;
        sha512_simple(password, &params).map_err(|e| WizardError::PasswordHash(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_sha512_crypt() {
        let hashed = ShaCryptHasher.hash("c1oudc0w").unwrap();
        assert!(hashed.starts_with("$6$"));
        assert_ne!(hashed, "c1oudc0w");
        assert!(sha_crypt::sha512_check("c1oudc0w", &hashed).is_ok());
        assert!(sha_crypt::sha512_check("wrong", &hashed).is_err());
    }

    #[test]
    fn test_each_hash_uses_new_salt() {
        let a = ShaCryptHasher.hash("same").unwrap();
        let b = ShaCryptHasher.hash("same").unwrap();
        assert_ne!(a, b);
    }
}
