// QuotationRepository
//
// MySQL storage for quotations and their line items. A quotation row and its
// item rows are always written in one transaction; items are replaced as a
// whole on update.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};

use crate::core::{AppError, ListFilter, Result};
use crate::modules::pricing::{DiscountKind, LineItem};
use crate::modules::quotations::models::{Quotation, QuotationStatus};

const QUOTATION_COLUMNS: &str = "id, quotation_number, date, customer_name, customer_phone, \
     customer_address, subtotal, discount_type, discount, discount_amount, total, notes, \
     status, created_at, updated_at";

/// Storage operations for quotations
#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// Insert a quotation with its items. A duplicate number is a validation error.
    async fn create(&self, quotation: &Quotation) -> Result<Quotation>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Quotation>>;

    /// Newest first
    async fn list(&self, filter: &ListFilter<QuotationStatus>) -> Result<Vec<Quotation>>;

    /// Replace every stored field and the items of an existing quotation
    async fn update(&self, quotation: &Quotation) -> Result<Quotation>;

    /// Set only the status; other fields are untouched
    async fn update_status(&self, id: &str, status: QuotationStatus) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn count(&self, status: Option<QuotationStatus>) -> Result<i64>;
}

/// MySQL-backed quotation repository
#[derive(Clone)]
pub struct MySqlQuotationRepository {
    pool: MySqlPool,
}

impl MySqlQuotationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        quotation_id: &str,
        items: &[LineItem],
    ) -> Result<()> {
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO quotation_items (
                    quotation_id, position, description, quantity, unit, rate, amount
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(quotation_id)
            .bind(position as i32)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit.to_string())
            .bind(item.rate)
            .bind(item.amount)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    async fn load_items(&self, ids: &[String]) -> Result<HashMap<String, Vec<LineItem>>> {
        let mut grouped: HashMap<String, Vec<LineItem>> = HashMap::new();
        if ids.is_empty() {
            return Ok(grouped);
        }

        let mut query = QueryBuilder::<MySql>::new(
            "SELECT quotation_id, description, quantity, unit, rate, amount \
             FROM quotation_items WHERE quotation_id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY quotation_id, position");

        let rows: Vec<QuotationItemRow> = query.build_query_as().fetch_all(&self.pool).await?;

        for row in rows {
            let quotation_id = row.quotation_id.clone();
            grouped
                .entry(quotation_id)
                .or_default()
                .push(row.into_line_item()?);
        }

        Ok(grouped)
    }

    fn conflict_message(quotation: &Quotation) -> String {
        format!(
            "Quotation with number '{}' already exists",
            quotation.quotation_number
        )
    }
}

#[async_trait]
impl QuotationRepository for MySqlQuotationRepository {
    async fn create(&self, quotation: &Quotation) -> Result<Quotation> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotations (
                id, quotation_number, date, customer_name, customer_phone, customer_address,
                subtotal, discount_type, discount, discount_amount, total, notes, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&quotation.id)
        .bind(&quotation.quotation_number)
        .bind(quotation.date)
        .bind(&quotation.customer_name)
        .bind(&quotation.customer_phone)
        .bind(&quotation.customer_address)
        .bind(quotation.subtotal)
        .bind(quotation.discount_type.to_string())
        .bind(quotation.discount)
        .bind(quotation.discount_amount)
        .bind(quotation.total)
        .bind(&quotation.notes)
        .bind(quotation.status.to_string())
        .bind(quotation.created_at)
        .bind(quotation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, Self::conflict_message(quotation)))?;

        Self::insert_items(&mut tx, &quotation.id, &quotation.items).await?;

        tx.commit().await?;

        Ok(quotation.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Quotation>> {
        let row = sqlx::query_as::<_, QuotationRow>(&format!(
            "SELECT {} FROM quotations WHERE id = ?",
            QUOTATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[row.id.clone()]).await?;
        let items = items.remove(&row.id).unwrap_or_default();

        Ok(Some(row.into_quotation(items)?))
    }

    async fn list(&self, filter: &ListFilter<QuotationStatus>) -> Result<Vec<Quotation>> {
        let mut query = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM quotations WHERE 1 = 1",
            QUOTATION_COLUMNS
        ));

        if let Some(pattern) = filter.like_pattern() {
            query
                .push(" AND (LOWER(customer_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(customer_phone) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(quotation_number) LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.to_string());
        }

        query.push(" ORDER BY created_at DESC");

        let rows: Vec<QuotationRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items = self.load_items(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                row.into_quotation(row_items)
            })
            .collect()
    }

    async fn update(&self, quotation: &Quotation) -> Result<Quotation> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE quotations SET
                quotation_number = ?, date = ?, customer_name = ?, customer_phone = ?,
                customer_address = ?, subtotal = ?, discount_type = ?, discount = ?,
                discount_amount = ?, total = ?, notes = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&quotation.quotation_number)
        .bind(quotation.date)
        .bind(&quotation.customer_name)
        .bind(&quotation.customer_phone)
        .bind(&quotation.customer_address)
        .bind(quotation.subtotal)
        .bind(quotation.discount_type.to_string())
        .bind(quotation.discount)
        .bind(quotation.discount_amount)
        .bind(quotation.total)
        .bind(&quotation.notes)
        .bind(quotation.status.to_string())
        .bind(quotation.updated_at)
        .bind(&quotation.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, Self::conflict_message(quotation)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Quotation with id '{}' not found",
                quotation.id
            )));
        }

        sqlx::query("DELETE FROM quotation_items WHERE quotation_id = ?")
            .bind(&quotation.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &quotation.id, &quotation.items).await?;

        tx.commit().await?;

        Ok(quotation.clone())
    }

    async fn update_status(&self, id: &str, status: QuotationStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE quotations
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Quotation with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        // quotation_items rows go with ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM quotations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Quotation with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn count(&self, status: Option<QuotationStatus>) -> Result<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotations WHERE status = ?")
                    .bind(status.to_string())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotations")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }
}

// Helper structs for database mapping

#[derive(Debug, sqlx::FromRow)]
struct QuotationRow {
    id: String,
    quotation_number: String,
    date: NaiveDate,
    customer_name: String,
    customer_phone: String,
    customer_address: Option<String>,
    subtotal: Decimal,
    discount_type: String,
    discount: Decimal,
    discount_amount: Decimal,
    total: Decimal,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuotationRow {
    fn into_quotation(self, items: Vec<LineItem>) -> Result<Quotation> {
        let status = QuotationStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;
        let discount_type = DiscountKind::from_str(&self.discount_type).map_err(|e| {
            AppError::internal(format!("Invalid discount type in database: {}", e))
        })?;

        Ok(Quotation {
            id: self.id,
            quotation_number: self.quotation_number,
            date: self.date,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            items,
            subtotal: self.subtotal,
            discount_type,
            discount: self.discount,
            discount_amount: self.discount_amount,
            total: self.total,
            notes: self.notes,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct QuotationItemRow {
    quotation_id: String,
    description: String,
    quantity: Decimal,
    unit: String,
    rate: Decimal,
    amount: Decimal,
}

impl QuotationItemRow {
    fn into_line_item(self) -> Result<LineItem> {
        LineItem::from_stored(
            self.description,
            self.quantity,
            &self.unit,
            self.rate,
            self.amount,
        )
    }
}
