use crate::domain::{error::DomainError, models::credential::HashedPassword};

/// Service for hashing and verifying passwords.
///
/// Implementations are stateless and safe to call concurrently; the work is
/// CPU-bound and deliberately slow, so async callers offload these calls to a
/// blocking thread instead of running them on the executor.
pub trait PasswordHasher: Clone {
    /// Hash a plain text password.
    ///
    /// Fails with [`DomainError::EmptyPassword`] for an empty password and
    /// with [`DomainError::HashingFailed`] when the primitive itself breaks.
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;

    /// Verify a plain text password against a stored hash.
    ///
    /// A wrong password, a malformed stored hash, and an unsupported legacy
    /// format all resolve to `Ok(false)`, never an error.
    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError>;
}
