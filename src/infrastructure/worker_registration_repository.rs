use async_trait::async_trait;
use entity::workers;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::{
        credential::HashedPassword,
        worker::{Email, Role, Worker},
    },
    repositories::worker_registration_repository::WorkerRegistrationRepository,
};

#[derive(Clone)]
pub struct PostgresWorkerRegistrationRepository {
    db: DatabaseConnection,
}

impl PostgresWorkerRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkerRegistrationRepository for PostgresWorkerRegistrationRepository {
    async fn register_worker_with_credentials(
        &self,
        name: &str,
        email: &Email,
        phone: Option<String>,
        role: Role,
        password_hash: HashedPassword,
    ) -> Result<Worker, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let worker_id = Uuid::new_v4();
        let now = chrono::Utc::now().fixed_offset();

        let worker_model = workers::ActiveModel {
            id: Set(worker_id),
            name: Set(name.to_string()),
            email: Set(email.as_str().to_string()),
            phone: Set(phone.clone()),
            role: Set(role.clone()),
            password_hash: Set(Some(password_hash.as_str().to_string())),
            admin_password_hash: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        workers::Entity::insert(worker_model)
            .exec(&txn)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let worker = Worker::new(worker_id, name.to_string(), email.clone(), phone, role)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(worker)
    }
}
