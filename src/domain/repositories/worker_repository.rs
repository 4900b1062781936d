use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{error::RepositoryError, models::worker::Worker};

#[async_trait]
pub trait WorkerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Worker>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, RepositoryError>;
}
