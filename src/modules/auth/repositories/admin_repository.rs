use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::auth::models::AdminUser;

/// Storage operations for admin accounts
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>>;

    async fn create(&self, admin: &AdminUser) -> Result<AdminUser>;
}

/// MySQL-backed admin repository
#[derive(Clone)]
pub struct MySqlAdminRepository {
    pool: MySqlPool,
}

impl MySqlAdminRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for MySqlAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admin_users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn create(&self, admin: &AdminUser) -> Result<AdminUser> {
        sqlx::query(
            r#"
            INSERT INTO admin_users (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_insert(e, format!("Admin '{}' already exists", admin.username))
        })?;

        Ok(admin.clone())
    }
}
