pub mod bcrypt_password_hasher;
pub mod credential_repository;
pub mod worker_registration_repository;
pub mod worker_repository;
