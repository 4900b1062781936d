use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        credential::HashedPassword,
        worker::{Email, Role, Worker},
    },
};

/// Repository for worker registration that creates the worker row and its
/// credential record in one transaction.
#[async_trait]
pub trait WorkerRegistrationRepository {
    async fn register_worker_with_credentials(
        &self,
        name: &str,
        email: &Email,
        phone: Option<String>,
        role: Role,
        password_hash: HashedPassword,
    ) -> Result<Worker, RepositoryError>;
}
