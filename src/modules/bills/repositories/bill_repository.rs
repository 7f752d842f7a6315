use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};

use crate::core::{AppError, ListFilter, Result};
use crate::modules::bills::models::Bill;
use crate::modules::pricing::{DiscountKind, LineItem, PaymentStatus};

const BILL_COLUMNS: &str = "id, bill_number, date, customer_name, customer_phone, \
     customer_address, subtotal, discount_type, discount, discount_amount, tax_rate, \
     tax_amount, total, amount_received, remaining_amount, notes, status, quotation_id, \
     created_at, updated_at";

/// Storage operations for bills
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// Insert a bill with its items. A duplicate number is a validation error.
    async fn create(&self, bill: &Bill) -> Result<Bill>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Bill>>;

    /// Newest first
    async fn list(&self, filter: &ListFilter<PaymentStatus>) -> Result<Vec<Bill>>;

    /// Replace every stored field and the items of an existing bill
    async fn update(&self, bill: &Bill) -> Result<Bill>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn count(&self, status: Option<PaymentStatus>) -> Result<i64>;
}

/// MySQL-backed bill repository
#[derive(Clone)]
pub struct MySqlBillRepository {
    pool: MySqlPool,
}

impl MySqlBillRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        bill_id: &str,
        items: &[LineItem],
    ) -> Result<()> {
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    bill_id, position, description, quantity, unit, rate, amount
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(bill_id)
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
            "SELECT bill_id, description, quantity, unit, rate, amount \
             FROM bill_items WHERE bill_id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY bill_id, position");

        let rows: Vec<BillItemRow> = query.build_query_as().fetch_all(&self.pool).await?;

        for row in rows {
            let bill_id = row.bill_id.clone();
            grouped
                .entry(bill_id)
                .or_default()
                .push(row.into_line_item()?);
        }

        Ok(grouped)
    }

    fn conflict_message(bill: &Bill) -> String {
        format!("Bill with number '{}' already exists", bill.bill_number)
    }
}

#[async_trait]
impl BillRepository for MySqlBillRepository {
    async fn create(&self, bill: &Bill) -> Result<Bill> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO bills (
                id, bill_number, date, customer_name, customer_phone, customer_address,
                subtotal, discount_type, discount, discount_amount, tax_rate, tax_amount,
                total, amount_received, remaining_amount, notes, status, quotation_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.bill_number)
        .bind(bill.date)
        .bind(&bill.customer_name)
        .bind(&bill.customer_phone)
        .bind(&bill.customer_address)
        .bind(bill.subtotal)
        .bind(bill.discount_type.to_string())
        .bind(bill.discount)
        .bind(bill.discount_amount)
        .bind(bill.tax_rate)
        .bind(bill.tax_amount)
        .bind(bill.total)
        .bind(bill.amount_received)
        .bind(bill.remaining_amount)
        .bind(&bill.notes)
        .bind(bill.status.to_string())
        .bind(&bill.quotation_id)
        .bind(bill.created_at)
        .bind(bill.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, Self::conflict_message(bill)))?;

        Self::insert_items(&mut tx, &bill.id, &bill.items).await?;

        tx.commit().await?;

        Ok(bill.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Bill>> {
        let row = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {} FROM bills WHERE id = ?",
            BILL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[row.id.clone()]).await?;
        let items = items.remove(&row.id).unwrap_or_default();

        Ok(Some(row.into_bill(items)?))
    }

    async fn list(&self, filter: &ListFilter<PaymentStatus>) -> Result<Vec<Bill>> {
        let mut query =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM bills WHERE 1 = 1", BILL_COLUMNS));

        if let Some(pattern) = filter.like_pattern() {
            query
                .push(" AND (LOWER(customer_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(customer_phone) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(bill_number) LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.to_string());
        }

        query.push(" ORDER BY created_at DESC");

        let rows: Vec<BillRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut items = self.load_items(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                row.into_bill(row_items)
            })
            .collect()
    }

    async fn update(&self, bill: &Bill) -> Result<Bill> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE bills SET
                bill_number = ?, date = ?, customer_name = ?, customer_phone = ?,
                customer_address = ?, subtotal = ?, discount_type = ?, discount = ?,
                discount_amount = ?, tax_rate = ?, tax_amount = ?, total = ?,
                amount_received = ?, remaining_amount = ?, notes = ?, status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&bill.bill_number)
        .bind(bill.date)
        .bind(&bill.customer_name)
        .bind(&bill.customer_phone)
        .bind(&bill.customer_address)
        .bind(bill.subtotal)
        .bind(bill.discount_type.to_string())
        .bind(bill.discount)
        .bind(bill.discount_amount)
        .bind(bill.tax_rate)
        .bind(bill.tax_amount)
        .bind(bill.total)
        .bind(bill.amount_received)
        .bind(bill.remaining_amount)
        .bind(&bill.notes)
        .bind(bill.status.to_string())
        .bind(bill.updated_at)
        .bind(&bill.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, Self::conflict_message(bill)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Bill with id '{}' not found",
                bill.id
            )));
        }

        sqlx::query("DELETE FROM bill_items WHERE bill_id = ?")
            .bind(&bill.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &bill.id, &bill.items).await?;

        tx.commit().await?;

        Ok(bill.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM bills WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Bill with id '{}' not found", id)));
        }

        Ok(())
    }

    async fn count(&self, status: Option<PaymentStatus>) -> Result<i64> {
        let count = match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bills WHERE status = ?")
                    .bind(status.to_string())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bills")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }
}

// Helper structs for database mapping

#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    id: String,
    bill_number: String,
    date: NaiveDate,
    customer_name: String,
    customer_phone: String,
    customer_address: Option<String>,
    subtotal: Decimal,
    discount_type: String,
    discount: Decimal,
    discount_amount: Decimal,
    tax_rate: Decimal,
    tax_amount: Decimal,
    total: Decimal,
    amount_received: Decimal,
    remaining_amount: Decimal,
    notes: Option<String>,
    status: String,
    quotation_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BillRow {
    fn into_bill(self, items: Vec<LineItem>) -> Result<Bill> {
        let status = PaymentStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;
        let discount_type = DiscountKind::from_str(&self.discount_type).map_err(|e| {
            AppError::internal(format!("Invalid discount type in database: {}", e))
        })?;

        Ok(Bill {
            id: self.id,
            bill_number: self.bill_number,
            date: self.date,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            items,
            subtotal: self.subtotal,
            discount_type,
            discount: self.discount,
            discount_amount: self.discount_amount,
            tax_rate: self.tax_rate,
            tax_amount: self.tax_amount,
            total: self.total,
            amount_received: self.amount_received,
            remaining_amount: self.remaining_amount,
            notes: self.notes,
            status,
            quotation_id: self.quotation_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BillItemRow {
    bill_id: String,
    description: String,
    quantity: Decimal,
    unit: String,
    rate: Decimal,
    amount: Decimal,
}

impl BillItemRow {
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
