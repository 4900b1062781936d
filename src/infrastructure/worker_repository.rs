use async_trait::async_trait;
use entity::workers;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::worker::{Email, Worker},
    repositories::worker_repository::WorkerRepository,
};

#[derive(Clone)]
pub struct PostgresWorkerRepository {
    db: DatabaseConnection,
}

impl PostgresWorkerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(model: workers::Model) -> Result<Worker, RepositoryError> {
    let email =
        Email::new(model.email).map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

    Worker::new(model.id, model.name, email, model.phone, model.role)
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl WorkerRepository for PostgresWorkerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Worker>, RepositoryError> {
        let worker = workers::Entity::find()
            .filter(workers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        worker.map(into_domain).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, RepositoryError> {
        let worker = workers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        worker.map(into_domain).transpose()
    }
}
