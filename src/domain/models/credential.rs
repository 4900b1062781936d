use chrono::{DateTime, Utc};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

/// Value object representing a hashed password.
///
/// The wrapped string is a self-describing bcrypt hash
/// (`$2b$<cost>$<salt+digest>`, 60 ASCII characters). It is opaque at this
/// boundary; only the hashing service parses its internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which credential slot an authentication attempt targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessScope {
    Standard,
    Elevated,
}

/// Per-worker credential record.
///
/// Carries up to two independent optional password hashes: one for ordinary
/// access and one for elevated (administrative) access. An absent slot means
/// that access path is disabled for the worker, not an error.
#[derive(Debug, Clone)]
pub struct Credential {
    worker_id: Uuid,
    email: String,
    password_hash: Option<HashedPassword>,
    admin_password_hash: Option<HashedPassword>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(worker_id: Uuid, email: String, password_hash: Option<HashedPassword>) -> Self {
        let now = Utc::now();
        Self {
            worker_id,
            email,
            password_hash,
            admin_password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        worker_id: Uuid,
        email: String,
        password_hash: Option<HashedPassword>,
        admin_password_hash: Option<HashedPassword>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            worker_id,
            email,
            password_hash,
            admin_password_hash,
            created_at,
            updated_at,
        }
    }

    /// The stored hash for the given scope, if that access path is enabled.
    pub fn hash_for(&self, scope: AccessScope) -> Option<&HashedPassword> {
        match scope {
            AccessScope::Standard => self.password_hash.as_ref(),
            AccessScope::Elevated => self.admin_password_hash.as_ref(),
        }
    }

    /// Replace a slot with a freshly produced hash. Hashes are never mutated
    /// in place, only swapped whole.
    pub fn rotate(&mut self, scope: AccessScope, new_hash: HashedPassword) {
        match scope {
            AccessScope::Standard => self.password_hash = Some(new_hash),
            AccessScope::Elevated => self.admin_password_hash = Some(new_hash),
        }
        self.updated_at = Utc::now();
    }

    pub fn worker_id(&self) -> Uuid {
        self.worker_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
