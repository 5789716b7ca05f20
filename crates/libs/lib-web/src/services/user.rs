//! # User Service
//!
//! Account lifecycle: self-registration, login, profile edits, soft delete,
//! and administrator-side account creation and role changes.
//!
//! ## Error Handling
//!
//! - `AppError::InvalidInput` - email already registered
//! - `AppError::Validation` - malformed email or password
//! - `AppError::Unauthorized` - bad credentials or inactive account at login
//! - `AppError::NotFound` - unknown user or role
//! - `AppError::Internal` - the built-in `user` role is missing

use lib_auth::{encode_jwt, hash_password, verify_dummy, verify_password};
use lib_core::dto::{RegisterRequest, TokenResponse, UserCreateRequest, UserRead, UserUpdateRequest};
use lib_core::model::rbac::ROLE_USER;
use lib_core::model::store::models::{UserForCreate, UserForUpdate};
use lib_core::model::store::{RoleRepository, UserRepository};
use lib_core::{AppError, Config, DbPool};
use tracing::{debug, info, warn};

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";

pub struct UserService {
    db: DbPool,
}

impl UserService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Register a new account with the `user` role, creating the role if it
    /// does not exist yet.
    pub async fn register(&self, req: RegisterRequest) -> Result<UserRead, AppError> {
        req.validate()?;

        let role = RoleRepository::get_or_create(&self.db, ROLE_USER).await?;
        let data = new_account(req.email, &req.password, role.id, req.name, req.surname, req.last_name)?;

        let user = self.insert(data).await?;
        info!("[REGISTER] User {} registered", user.id);
        Ok(user)
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, config: &Config, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        let user = UserRepository::find_by_email(&self.db, email).await?;

        let verified = match &user {
            Some(user) => verify_password(password, &user.password_hash)?,
            None => verify_dummy(password),
        };

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!("[LOGIN] Rejected credentials for {}", email);
                return Err(AppError::Unauthorized(INCORRECT_CREDENTIALS.to_string()));
            }
        };

        if !user.is_active {
            warn!("[LOGIN] Inactive account {}", user.id);
            return Err(AppError::Unauthorized("Inactive user".to_string()));
        }

        let token = encode_jwt(user.id, &config.jwt_secret, config.access_token_expire_minutes)?;
        info!("[LOGIN] User {} authenticated", user.id);

        Ok(TokenResponse::bearer(token))
    }

    pub async fn get(&self, id: i64) -> Result<UserRead, AppError> {
        UserRepository::find_with_role(&self.db, id)
            .await?
            .map(UserRead::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<UserRead>, AppError> {
        let users = UserRepository::list_with_role(&self.db).await?;
        Ok(users.into_iter().map(UserRead::from).collect())
    }

    pub async fn update_profile(&self, id: i64, req: UserUpdateRequest) -> Result<UserRead, AppError> {
        if let Some(name) = &req.name {
            lib_utils::validate_not_empty(name, "name").map_err(AppError::Validation)?;
        }

        UserRepository::update(&self.db, id, UserForUpdate::from(req))
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.get(id).await
    }

    /// Soft delete: the account stays but can no longer authenticate.
    pub async fn deactivate(&self, id: i64) -> Result<(), AppError> {
        if !UserRepository::deactivate(&self.db, id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        info!("[USERS] User {} deactivated", id);
        Ok(())
    }

    /// Create an account on behalf of an administrator.
    ///
    /// An explicit `role_id` must exist; without one the `user` role is used.
    pub async fn create_by_admin(&self, req: UserCreateRequest) -> Result<UserRead, AppError> {
        req.validate()?;

        let role_id = match req.role_id {
            Some(role_id) => {
                RoleRepository::find_by_id(&self.db, role_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Role with id {} not found", role_id)))?
                    .id
            }
            None => {
                RoleRepository::find_by_name(&self.db, ROLE_USER)
                    .await?
                    .ok_or_else(|| AppError::Internal("Base role 'user' not found".to_string()))?
                    .id
            }
        };

        let mut data = new_account(req.email, &req.password, role_id, req.name, req.surname, req.last_name)?;
        data.is_active = req.is_active;

        let user = self.insert(data).await?;
        info!("[ADMIN] Created user {} with role {}", user.id, user.role.name);
        Ok(user)
    }

    pub async fn change_role(&self, user_id: i64, role_id: i64) -> Result<UserRead, AppError> {
        if UserRepository::find_by_id(&self.db, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if RoleRepository::find_by_id(&self.db, role_id).await?.is_none() {
            return Err(AppError::NotFound("Role not found".to_string()));
        }

        UserRepository::update(&self.db, user_id, UserForUpdate::new().role_id(role_id)).await?;
        info!("[ADMIN] User {} moved to role {}", user_id, role_id);

        self.get(user_id).await
    }

    async fn insert(&self, data: UserForCreate) -> Result<UserRead, AppError> {
        if UserRepository::find_by_email(&self.db, &data.email).await?.is_some() {
            debug!("Email already registered: {}", data.email);
            return Err(email_taken());
        }

        let user = UserRepository::create_with(&self.db, data).await.map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => email_taken(),
            e => AppError::from(e),
        })?;

        self.get(user.id).await
    }
}

fn email_taken() -> AppError {
    AppError::InvalidInput("Email already registered".to_string())
}

fn new_account(
    email: String,
    password: &str,
    role_id: i64,
    name: Option<String>,
    surname: Option<String>,
    last_name: Option<String>,
) -> Result<UserForCreate, AppError> {
    let password_hash = hash_password(password)?;

    let mut data = UserForCreate::new(email, password_hash, role_id);
    if let Some(name) = name {
        data.name = name;
    }
    data.surname = surname;
    data.last_name = last_name;

    Ok(data)
}
