use sha2::{Digest, Sha256};

use crate::domain::{
    error::DomainError, models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

/// bcrypt only hashes the first 72 bytes of its input and silently drops the
/// rest. Longer passwords are pre-digested so that no entropy is discarded
/// and no two long passwords collide on a shared prefix.
const MAX_BCRYPT_BYTES: usize = 72;

#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the cost factor for new hashes. The cost travels inside each
    /// produced hash string, so stored hashes keep verifying after a change.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Map a password to bytes that fit within the bcrypt input limit.
    ///
    /// Passwords whose UTF-8 encoding fits are passed through unchanged.
    /// Longer ones are reduced to the 64-character lowercase hex rendering of
    /// their SHA-256 digest, which always fits. Deterministic: the same
    /// password always yields the same bytes.
    fn prepare(plain_password: &str) -> Result<Vec<u8>, DomainError> {
        if plain_password.is_empty() {
            return Err(DomainError::EmptyPassword);
        }

        let raw = plain_password.as_bytes();
        if raw.len() <= MAX_BCRYPT_BYTES {
            return Ok(raw.to_vec());
        }

        let digest = Sha256::digest(raw);
        Ok(hex::encode(digest).into_bytes())
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let prepared = Self::prepare(plain_password)?;

        let hash = bcrypt::hash(prepared, self.cost)
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword::new(hash))
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        let raw = plain_password.as_bytes();

        // Primary attempt: the prepared input, matching every hash produced
        // by `hash`. bcrypt reconstructs cost and salt from the stored string.
        if let Ok(prepared) = Self::prepare(plain_password) {
            match bcrypt::verify(&prepared, hashed_password.as_str()) {
                Ok(true) => return Ok(true),
                // Short password: the prepared bytes are the raw bytes, so
                // the legacy attempt below would repeat this comparison.
                Ok(false) if prepared.as_slice() == raw => return Ok(false),
                Ok(false) | Err(_) => {
                    tracing::debug!("primary verification attempt failed, trying legacy path");
                }
            }
        }

        // Legacy attempt: hashes created before pre-digesting existed were
        // fed the raw bytes, truncated by bcrypt itself at 72.
        let legacy = &raw[..raw.len().min(MAX_BCRYPT_BYTES)];
        Ok(bcrypt::verify(legacy, hashed_password.as_str()).unwrap_or(false))
    }
}
