use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::credential::{AccessScope, Credential, HashedPassword},
};

#[async_trait]
pub trait CredentialRepository {
    /// Load the credential record for a worker by email.
    async fn get_credential(&self, email: &str) -> Result<Credential, RepositoryError>;

    /// Replace one credential slot with a new hash.
    async fn rotate_credential(
        &self,
        worker_id: Uuid,
        scope: AccessScope,
        new_hash: HashedPassword,
    ) -> Result<(), RepositoryError>;
}
