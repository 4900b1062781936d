pub mod change_password_usecase;
pub mod login_usecase;
pub mod register_worker_usecase;
