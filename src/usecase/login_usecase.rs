use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{credential::AccessScope, worker::Worker},
    repositories::{
        credential_repository::CredentialRepository, worker_repository::WorkerRepository,
    },
    services::password_service::PasswordHasher,
};

#[derive(Debug)]
pub struct LoginResult {
    pub worker: Worker,
}

pub struct LoginUsecase<C: CredentialRepository, W: WorkerRepository, P: PasswordHasher> {
    credential_repository: C,
    worker_repository: W,
    password_hasher: P,
}

impl<C: CredentialRepository, W: WorkerRepository, P: PasswordHasher> LoginUsecase<C, W, P> {
    pub fn new(credential_repository: C, worker_repository: W, password_hasher: P) -> Self {
        Self {
            credential_repository,
            worker_repository,
            password_hasher,
        }
    }

    pub async fn login(
        &self,
        email: String,
        password: String,
        scope: AccessScope,
    ) -> Result<LoginResult, DomainError>
    where
        C: Send + Sync,
        W: Send + Sync,
        P: Send + Sync + 'static,
    {
        let credential = self.credential_repository.get_credential(&email).await?;

        // An absent slot means that access path is disabled for this worker.
        let stored = credential
            .hash_for(scope)
            .cloned()
            .ok_or(DomainError::AuthenticationFailed)?;

        // Verification is CPU-bound and deliberately slow; keep it off the
        // async executor.
        let hasher = self.password_hasher.clone();
        let matched = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))??;

        if !matched {
            tracing::debug!(worker_id = %credential.worker_id(), ?scope, "password verification failed");
            return Err(DomainError::AuthenticationFailed);
        }

        let worker = self
            .worker_repository
            .find_by_id(credential.worker_id())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(LoginResult { worker })
    }
}
