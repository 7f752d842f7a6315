use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::submissions::models::QuoteRequest;

/// Storage operations for public quote requests
#[async_trait]
pub trait QuoteRequestRepository: Send + Sync {
    async fn create(&self, request: &QuoteRequest) -> Result<QuoteRequest>;
}

/// MySQL-backed quote request repository
#[derive(Clone)]
pub struct MySqlQuoteRequestRepository {
    pool: MySqlPool,
}

impl MySqlQuoteRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRequestRepository for MySqlQuoteRequestRepository {
    async fn create(&self, request: &QuoteRequest) -> Result<QuoteRequest> {
        sqlx::query(
            r#"
            INSERT INTO quote_requests (
                id, name, phone, email, service_type, location, project_details, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&request.service_type)
        .bind(&request.location)
        .bind(&request.project_details)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        Ok(request.clone())
    }
}
