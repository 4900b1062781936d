use async_trait::async_trait;
use chrono::Utc;
use entity::workers;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::credential::{AccessScope, Credential, HashedPassword},
    repositories::credential_repository::CredentialRepository,
};

#[derive(Clone)]
pub struct PostgresCredentialRepository {
    db: DatabaseConnection,
}

impl PostgresCredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn get_credential(&self, email: &str) -> Result<Credential, RepositoryError> {
        let worker = workers::Entity::find()
            .filter(workers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let credential = Credential::reconstruct(
            worker.id,
            worker.email,
            worker.password_hash.map(HashedPassword::new),
            worker.admin_password_hash.map(HashedPassword::new),
            worker.created_at.naive_utc().and_utc(),
            worker.updated_at.naive_utc().and_utc(),
        );

        Ok(credential)
    }

    async fn rotate_credential(
        &self,
        worker_id: Uuid,
        scope: AccessScope,
        new_hash: HashedPassword,
    ) -> Result<(), RepositoryError> {
        let worker = workers::Entity::find_by_id(worker_id)
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        let mut active = worker.into_active_model();
        match scope {
            AccessScope::Standard => {
                active.password_hash = Set(Some(new_hash.as_str().to_string()));
            }
            AccessScope::Elevated => {
                active.admin_password_hash = Set(Some(new_hash.as_str().to_string()));
            }
        }
        active.updated_at = Set(Utc::now().fixed_offset());

        workers::Entity::update(active)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
