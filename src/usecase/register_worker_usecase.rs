use crate::{
    domain::{
        error::DomainError,
        models::worker::{Email, Role},
        repositories::worker_registration_repository::WorkerRegistrationRepository,
        services::password_service::PasswordHasher,
    },
    usecase::login_usecase::LoginResult,
};

pub struct RegisterWorkerUsecase<R: WorkerRegistrationRepository, P: PasswordHasher> {
    registration_repository: R,
    password_hasher: P,
}

impl<R: WorkerRegistrationRepository, P: PasswordHasher> RegisterWorkerUsecase<R, P> {
    pub fn new(registration_repository: R, password_hasher: P) -> Self {
        Self {
            registration_repository,
            password_hasher,
        }
    }

    pub async fn create_worker(
        &self,
        name: String,
        email: String,
        phone: Option<String>,
        role: Role,
        password: String,
    ) -> Result<LoginResult, DomainError>
    where
        R: Send + Sync,
        P: Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let email = Email::new(email)?;

        let hasher = self.password_hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))??;

        let worker = self
            .registration_repository
            .register_worker_with_credentials(&name, &email, phone, role, password_hash)
            .await?;

        Ok(LoginResult { worker })
    }
}
