use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::auth::models::{AdminUser, LoginRequest, LoginResponse};
use crate::modules::auth::repositories::AdminRepository;
use crate::modules::auth::services::password;
use crate::modules::auth::services::TokenService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Service for admin login and bootstrap
pub struct AuthService {
    admin_repo: Arc<dyn AdminRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, tokens: TokenService) -> Self {
        Self { admin_repo, tokens }
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown usernames and wrong passwords fail with the same message.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        request.validate()?;

        let admin = self
            .admin_repo
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %request.username, "Login with unknown username");
                AppError::unauthorized(INVALID_CREDENTIALS)
            })?;

        if !password::verify_password(&request.password, &admin.password_hash)? {
            tracing::warn!(admin_id = %admin.id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(&admin.id)?;

        tracing::info!(admin_id = %admin.id, "Admin logged in");

        Ok(LoginResponse {
            id: admin.id,
            username: admin.username,
            token,
        })
    }

    /// Create the admin account if it does not exist yet
    ///
    /// Returns true when a new account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Configuration(
                "Admin username and password must not be empty".to_string(),
            ));
        }

        if self.admin_repo.find_by_username(username).await?.is_some() {
            tracing::debug!(username = %username, "Admin account already present");
            return Ok(false);
        }

        let hash = password::hash_password(password)?;
        let admin = self
            .admin_repo
            .create(&AdminUser::new(username.to_string(), hash))
            .await?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin account created");

        Ok(true)
    }
}
