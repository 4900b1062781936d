mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::{
    infrastructure::{
        bcrypt_password_hasher::BcryptPasswordHasher,
        credential_repository::PostgresCredentialRepository,
        worker_registration_repository::PostgresWorkerRegistrationRepository,
        worker_repository::PostgresWorkerRepository,
    },
    presentation::handlers::worker_handler::create_worker_router,
    usecase::{
        change_password_usecase::ChangePasswordUsecase, login_usecase::LoginUsecase,
        register_worker_usecase::RegisterWorkerUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut opt = ConnectOptions::new(dotenvy::var("DATABASE_URL")?);
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt)
        .await
        .expect("Connection to DB failed");
    let worker_repository = PostgresWorkerRepository::new(db.clone());
    let credential_repository = PostgresCredentialRepository::new(db.clone());
    let registration_repository = PostgresWorkerRegistrationRepository::new(db.clone());

    // The cost travels inside each stored hash, so raising it here only
    // affects hashes created from now on.
    let cost = dotenvy::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(bcrypt::DEFAULT_COST);
    let password_hasher = BcryptPasswordHasher::with_cost(cost);

    let login_service = LoginUsecase::new(
        credential_repository.clone(),
        worker_repository.clone(),
        password_hasher.clone(),
    );
    let register_service = RegisterWorkerUsecase::new(
        registration_repository.clone(),
        password_hasher.clone(),
    );
    let change_password_service = ChangePasswordUsecase::new(
        credential_repository.clone(),
        password_hasher.clone(),
    );

    let app = Router::new()
        .route("/", get(|| async { "auth-api" }))
        .nest(
            "/api",
            create_worker_router(login_service, register_service, change_password_service),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        domain::{
            error::{DomainError, RepositoryError},
            models::{
                credential::{AccessScope, Credential, HashedPassword},
                worker::{Email, Role, Worker},
            },
            repositories::{
                credential_repository::CredentialRepository,
                worker_registration_repository::WorkerRegistrationRepository,
                worker_repository::WorkerRepository,
            },
            services::password_service::PasswordHasher,
        },
        infrastructure::bcrypt_password_hasher::BcryptPasswordHasher,
        presentation::handlers::worker_handler::{
            ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
            create_worker_router,
        },
        usecase::{
            change_password_usecase::ChangePasswordUsecase, login_usecase::LoginUsecase,
            register_worker_usecase::RegisterWorkerUsecase,
        },
    };

    const TEST_ID: &str = "00000000-0000-0000-0000-000000000001";
    const TEST_EMAIL: &str = "worker@example.com";
    const TEST_PASSWORD: &str = "test_password";
    const TEST_COST: u32 = 4;

    fn test_worker() -> Worker {
        let id = Uuid::parse_str(TEST_ID).unwrap();
        let email = Email::new(TEST_EMAIL.to_string()).unwrap();
        Worker::new(id, "testworker".to_string(), email, None, "customer".to_string()).unwrap()
    }

    // mock repository interface

    /// Credential store for "worker@example.com" with a real bcrypt hash of
    /// TEST_PASSWORD in the standard slot and an empty elevated slot.
    #[derive(Clone)]
    struct MockCredentialRepository {
        password_hash: HashedPassword,
        rotated: Arc<Mutex<Vec<(AccessScope, HashedPassword)>>>,
    }

    impl MockCredentialRepository {
        fn new() -> Self {
            let hash = BcryptPasswordHasher::with_cost(TEST_COST)
                .hash(TEST_PASSWORD)
                .unwrap();
            Self {
                password_hash: hash,
                rotated: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn get_credential(&self, email: &str) -> Result<Credential, RepositoryError> {
            if email == TEST_EMAIL {
                let id = Uuid::parse_str(TEST_ID).unwrap();
                Ok(Credential::new(
                    id,
                    email.to_string(),
                    Some(self.password_hash.clone()),
                ))
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        async fn rotate_credential(
            &self,
            _worker_id: Uuid,
            scope: AccessScope,
            new_hash: HashedPassword,
        ) -> Result<(), RepositoryError> {
            self.rotated.lock().unwrap().push((scope, new_hash));
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MockWorkerRepository;

    #[async_trait]
    impl WorkerRepository for MockWorkerRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Worker>, RepositoryError> {
            if email == TEST_EMAIL {
                Ok(Some(test_worker()))
            } else {
                Ok(None)
            }
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Worker>, RepositoryError> {
            if id.to_string() == TEST_ID {
                Ok(Some(test_worker()))
            } else {
                Ok(None)
            }
        }
    }

    #[derive(Clone)]
    struct MockRegistrationRepository;

    #[async_trait]
    impl WorkerRegistrationRepository for MockRegistrationRepository {
        async fn register_worker_with_credentials(
            &self,
            name: &str,
            email: &Email,
            phone: Option<String>,
            role: Role,
            _password_hash: HashedPassword,
        ) -> Result<Worker, RepositoryError> {
            if email.as_str().contains("duplicated") {
                Err(RepositoryError::DatabaseError(
                    "Email already exists".to_string(),
                ))
            } else {
                let id = Uuid::parse_str(TEST_ID).unwrap();
                let worker = Worker::new(id, name.to_string(), email.clone(), phone, role)
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                Ok(worker)
            }
        }
    }

    #[fixture]
    fn test_app() -> Router {
        // real hasher at the minimum cost, mock repositories
        let mock_credential_repo = MockCredentialRepository::new();
        let mock_worker_repo = MockWorkerRepository;
        let mock_registration_repo = MockRegistrationRepository;
        let password_hasher = BcryptPasswordHasher::with_cost(TEST_COST);

        let login_service = LoginUsecase::new(
            mock_credential_repo.clone(),
            mock_worker_repo.clone(),
            password_hasher.clone(),
        );
        let register_service =
            RegisterWorkerUsecase::new(mock_registration_repo.clone(), password_hasher.clone());
        let change_password_service =
            ChangePasswordUsecase::new(mock_credential_repo.clone(), password_hasher.clone());

        // setup router: sync settings of main.app
        Router::new().nest(
            "/api",
            create_worker_router(login_service, register_service, change_password_service),
        )
    }

    async fn send_json(app: Router, method: &str, uri: &str, body: String) -> Response {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    // Login usecase

    #[rstest]
    #[tokio::test]
    async fn test_login_positive(test_app: Router) {
        let login_request = LoginRequest {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let body = serde_json::to_string(&login_request).unwrap();

        let response = send_json(test_app, "POST", "/api/login", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let login_response: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(TEST_ID, login_response.worker.id);
        assert_eq!(TEST_EMAIL, login_response.worker.email);
    }

    #[rstest]
    #[tokio::test]
    async fn test_login_unknown_worker_negative(test_app: Router) {
        let login_request = LoginRequest {
            email: "nobody@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let body = serde_json::to_string(&login_request).unwrap();

        let response = send_json(test_app, "POST", "/api/login", body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[tokio::test]
    async fn test_login_wrong_password_negative(test_app: Router) {
        let login_request = LoginRequest {
            email: TEST_EMAIL.to_string(),
            password: "wrong_password".to_string(),
        };
        let body = serde_json::to_string(&login_request).unwrap();

        let response = send_json(test_app, "POST", "/api/login", body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[tokio::test]
    async fn test_admin_login_without_elevated_slot_negative(test_app: Router) {
        // the elevated slot is absent, so that access path is disabled even
        // with the correct standard password
        let login_request = LoginRequest {
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        let body = serde_json::to_string(&login_request).unwrap();

        let response = send_json(test_app, "POST", "/api/admin/login", body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Register usecase

    #[rstest]
    #[tokio::test]
    async fn test_register_positive(test_app: Router) {
        let register_request = RegisterRequest {
            name: "newworker".to_string(),
            email: "new@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            role: Some("merchant".to_string()),
            password: "new_password".to_string(),
        };
        let body = serde_json::to_string(&register_request).unwrap();

        let response = send_json(test_app, "POST", "/api/register", body).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let login_response: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(TEST_ID, login_response.worker.id);
        assert_eq!("new@example.com", login_response.worker.email);
        assert_eq!("merchant", login_response.worker.role);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_duplicated_email_negative(test_app: Router) {
        let register_request = RegisterRequest {
            name: "newworker".to_string(),
            email: "duplicated@example.com".to_string(),
            phone: None,
            role: None,
            password: "new_password".to_string(),
        };
        let body = serde_json::to_string(&register_request).unwrap();

        let response = send_json(test_app, "POST", "/api/register", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_empty_password_negative(test_app: Router) {
        let register_request = RegisterRequest {
            name: "newworker".to_string(),
            email: "new@example.com".to_string(),
            phone: None,
            role: None,
            password: String::new(),
        };
        let body = serde_json::to_string(&register_request).unwrap();

        let response = send_json(test_app, "POST", "/api/register", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Change password usecase

    #[rstest]
    #[tokio::test]
    async fn test_change_password_positive(test_app: Router) {
        let request = ChangePasswordRequest {
            email: TEST_EMAIL.to_string(),
            scope: AccessScope::Standard,
            current_password: TEST_PASSWORD.to_string(),
            new_password: "rotated_password".to_string(),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = send_json(test_app, "PUT", "/api/password", body).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_password_wrong_current_negative(test_app: Router) {
        let request = ChangePasswordRequest {
            email: TEST_EMAIL.to_string(),
            scope: AccessScope::Standard,
            current_password: "wrong_password".to_string(),
            new_password: "rotated_password".to_string(),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = send_json(test_app, "PUT", "/api/password", body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[tokio::test]
    async fn test_enable_elevated_access_with_standard_password(test_app: Router) {
        // rotating an absent elevated slot checks the standard password
        let request = ChangePasswordRequest {
            email: TEST_EMAIL.to_string(),
            scope: AccessScope::Elevated,
            current_password: TEST_PASSWORD.to_string(),
            new_password: "admin_password".to_string(),
        };
        let body = serde_json::to_string(&request).unwrap();

        let response = send_json(test_app, "PUT", "/api/password", body).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    // DomainError mapping sanity for the hashing service itself

    #[tokio::test]
    async fn test_login_legacy_credential_fallback() {
        // A stored hash produced before pre-digesting existed: raw bytes of a
        // long password, truncated by bcrypt at 72. The login path must still
        // accept it via the legacy fallback.
        let long_password = "p".repeat(100);
        let legacy_hash = HashedPassword::new(
            bcrypt::hash(&long_password.as_bytes()[..72], TEST_COST).unwrap(),
        );

        #[derive(Clone)]
        struct LegacyCredentialRepository {
            hash: HashedPassword,
        }

        #[async_trait]
        impl CredentialRepository for LegacyCredentialRepository {
            async fn get_credential(&self, email: &str) -> Result<Credential, RepositoryError> {
                let id = Uuid::parse_str(TEST_ID).unwrap();
                Ok(Credential::new(
                    id,
                    email.to_string(),
                    Some(self.hash.clone()),
                ))
            }

            async fn rotate_credential(
                &self,
                _worker_id: Uuid,
                _scope: AccessScope,
                _new_hash: HashedPassword,
            ) -> Result<(), RepositoryError> {
                Ok(())
            }
        }

        let login_service = LoginUsecase::new(
            LegacyCredentialRepository { hash: legacy_hash },
            MockWorkerRepository,
            BcryptPasswordHasher::with_cost(TEST_COST),
        );

        let result = login_service
            .login(
                TEST_EMAIL.to_string(),
                long_password,
                AccessScope::Standard,
            )
            .await;
        assert!(result.is_ok());

        let wrong = login_service
            .login(
                TEST_EMAIL.to_string(),
                "q".repeat(100),
                AccessScope::Standard,
            )
            .await;
        assert!(matches!(wrong, Err(DomainError::AuthenticationFailed)));
    }
}
