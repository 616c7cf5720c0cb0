use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_email, validate_password, verify_password, JwtService};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(request.name.trim().to_string()),
            email: Set(request.email),
            email_verified: Set(false),
            password_hash: Set(password_hash),
            role: Set(Role::Member.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await?;

        log::info!("Registered user {}", user.id);

        self.issue_tokens(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(request.email.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid email or password".to_string(),
            ));
        }

        self.issue_tokens(user)
    }

    /// Exchanges a refresh token for a new token pair. The user row is
    /// re-read so a role change takes effect on the next pair.
    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(&request.refresh_token)?;

        let user = users::Entity::find_by_id(claims.sub)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(&user.id, &user.role)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(&user.id, &user.role)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: UserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1);
        let pool = Database::connect(options).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }

    fn service(pool: DatabaseConnection) -> AuthService {
        AuthService::new(pool, JwtService::new("test-secret", 3600, 86400))
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let svc = service(setup().await);

        let registered = svc
            .register(RegisterRequest {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(registered.user.email, "jane@example.com");
        assert_eq!(registered.user.role, Role::Member);
        assert!(!registered.access_token.is_empty());

        let logged_in = svc
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let svc = service(setup().await);

        let request = || RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "Password123".to_string(),
        };

        svc.register(request()).await.unwrap();
        let err = svc.register(request()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let svc = service(setup().await);

        svc.register(RegisterRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .await
        .unwrap();

        let err = svc
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "WrongPassword1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_refresh_round_trip() {
        let svc = service(setup().await);

        let registered = svc
            .register(RegisterRequest {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        let refreshed = svc
            .refresh(RefreshRequest {
                refresh_token: registered.refresh_token,
            })
            .await
            .unwrap();

        assert_eq!(refreshed.user.id, registered.user.id);
        assert!(!refreshed.access_token.is_empty());
    }
}
