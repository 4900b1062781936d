use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::credential::AccessScope,
        repositories::{
            credential_repository::CredentialRepository,
            worker_registration_repository::WorkerRegistrationRepository,
            worker_repository::WorkerRepository,
        },
        services::password_service::PasswordHasher,
    },
    usecase::{
        change_password_usecase::ChangePasswordUsecase, login_usecase::LoginUsecase,
        register_worker_usecase::RegisterWorkerUsecase,
    },
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use serde::{Deserialize, Serialize};

// Request

/// json for login request
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub password: String,
}

/// json for change password request
#[derive(Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub scope: AccessScope,
    pub current_password: String,
    pub new_password: String,
}

// Response

/// json for login response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub worker: WorkerInfo,
}

#[derive(Serialize, Deserialize)]
pub struct WorkerInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
}

impl From<crate::domain::models::worker::Worker> for WorkerInfo {
    fn from(worker: crate::domain::models::worker::Worker) -> Self {
        Self {
            id: worker.id().as_uuid().to_string(),
            name: worker.name().to_string(),
            email: worker.email().as_str().to_string(),
            phone: worker.phone().map(|p| p.to_string()),
            role: worker.role().to_string(),
        }
    }
}

/* Router Function and Handler Function */

// Worker Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_worker_router<
    C: CredentialRepository + Send + Sync + 'static + Clone,
    W: WorkerRepository + Send + Sync + 'static + Clone,
    R: WorkerRegistrationRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    login_service: LoginUsecase<C, W, P>,
    register_service: RegisterWorkerUsecase<R, P>,
    change_password_service: ChangePasswordUsecase<C, P>,
) -> Router {
    let state = AppState {
        login_service: Arc::new(login_service),
        register_service: Arc::new(register_service),
        change_password_service: Arc::new(change_password_service),
    };

    Router::new()
        .route("/login", post(login::<C, W, R, P>))
        .route("/admin/login", post(admin_login::<C, W, R, P>))
        .route("/register", post(register::<C, W, R, P>))
        .route("/password", put(change_password::<C, W, R, P>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<
    C: CredentialRepository,
    W: WorkerRepository,
    R: WorkerRegistrationRepository,
    P: PasswordHasher,
> {
    pub login_service: Arc<LoginUsecase<C, W, P>>,
    pub register_service: Arc<RegisterWorkerUsecase<R, P>>,
    pub change_password_service: Arc<ChangePasswordUsecase<C, P>>,
}

// handler function

async fn login_with_scope<
    C: CredentialRepository + Send + Sync,
    W: WorkerRepository + Send + Sync,
    P: PasswordHasher + Send + Sync + 'static,
>(
    login_service: &LoginUsecase<C, W, P>,
    payload: LoginRequest,
    scope: AccessScope,
) -> axum::response::Response {
    match login_service
        .login(payload.email, payload.password, scope)
        .await
    {
        Ok(result) => {
            let response = LoginResponse {
                worker: result.worker.into(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::UNAUTHORIZED, Json("Authentication failed")).into_response(),
    }
}

/// handler function for login
async fn login<
    C: CredentialRepository + Send + Sync,
    W: WorkerRepository + Send + Sync,
    R: WorkerRegistrationRepository,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<C, W, R, P>>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    login_with_scope(&state.login_service, payload, AccessScope::Standard).await
}

/// handler function for login against the administrative credential
async fn admin_login<
    C: CredentialRepository + Send + Sync,
    W: WorkerRepository + Send + Sync,
    R: WorkerRegistrationRepository,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<C, W, R, P>>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    login_with_scope(&state.login_service, payload, AccessScope::Elevated).await
}

/// handler function for register
async fn register<
    C: CredentialRepository,
    W: WorkerRepository,
    R: WorkerRegistrationRepository + Send + Sync,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<C, W, R, P>>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    match state
        .register_service
        .create_worker(
            payload.name,
            payload.email,
            payload.phone,
            payload.role.unwrap_or_else(|| "customer".to_string()),
            payload.password,
        )
        .await
    {
        Ok(result) => {
            let response = LoginResponse {
                worker: result.worker.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(_) => (StatusCode::BAD_REQUEST, Json("Registration failed")).into_response(),
    }
}

/// handler function for password change
async fn change_password<
    C: CredentialRepository + Send + Sync,
    W: WorkerRepository,
    R: WorkerRegistrationRepository,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<C, W, R, P>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    match state
        .change_password_service
        .change_password(
            payload.email,
            payload.scope,
            payload.current_password,
            payload.new_password,
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(DomainError::AuthenticationFailed) | Err(DomainError::Repository(_)) => {
            (StatusCode::UNAUTHORIZED, Json("Authentication failed")).into_response()
        }
        Err(_) => (StatusCode::BAD_REQUEST, Json("Password change failed")).into_response(),
    }
}
