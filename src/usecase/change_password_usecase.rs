use crate::domain::{
    error::DomainError,
    models::credential::AccessScope,
    repositories::credential_repository::CredentialRepository,
    services::password_service::PasswordHasher,
};

pub struct ChangePasswordUsecase<C: CredentialRepository, P: PasswordHasher> {
    credential_repository: C,
    password_hasher: P,
}

impl<C: CredentialRepository, P: PasswordHasher> ChangePasswordUsecase<C, P> {
    pub fn new(credential_repository: C, password_hasher: P) -> Self {
        Self {
            credential_repository,
            password_hasher,
        }
    }

    /// Rotate one credential slot after proving knowledge of the current
    /// password.
    ///
    /// When the targeted slot is not yet set (enabling elevated access for
    /// the first time), the current password is checked against the standard
    /// slot instead.
    pub async fn change_password(
        &self,
        email: String,
        scope: AccessScope,
        current_password: String,
        new_password: String,
    ) -> Result<(), DomainError>
    where
        C: Send + Sync,
        P: Send + Sync + 'static,
    {
        let credential = self.credential_repository.get_credential(&email).await?;

        let stored = credential
            .hash_for(scope)
            .or_else(|| credential.hash_for(AccessScope::Standard))
            .cloned()
            .ok_or(DomainError::AuthenticationFailed)?;

        let hasher = self.password_hasher.clone();
        let matched =
            tokio::task::spawn_blocking(move || hasher.verify(&current_password, &stored))
                .await
                .map_err(|e| DomainError::HashingFailed(e.to_string()))??;

        if !matched {
            tracing::debug!(worker_id = %credential.worker_id(), ?scope, "password change rejected");
            return Err(DomainError::AuthenticationFailed);
        }

        let hasher = self.password_hasher.clone();
        let new_hash = tokio::task::spawn_blocking(move || hasher.hash(&new_password))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))??;

        self.credential_repository
            .rotate_credential(credential.worker_id(), scope, new_hash)
            .await?;

        Ok(())
    }
}
