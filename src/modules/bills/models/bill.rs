// A bill is an issued invoice: line items, discount, tax and the running
// payment position. Its status is never stored on its own; it always follows
// from the amount received against the total.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{money, validation, AppError, Result};
use crate::modules::pricing::{
    BillTotals, Discount, DiscountKind, LineItem, LineItemInput, PaymentStatus,
};

/// Represents a stored bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub bill_number: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub discount_type: DiscountKind,
    /// Discount percentage (given or derived)
    pub discount: Decimal,
    pub discount_amount: Decimal,
    /// Tax percentage applied after the discount
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub amount_received: Decimal,
    pub remaining_amount: Decimal,
    pub notes: Option<String>,
    pub status: PaymentStatus,
    /// Quotation this bill was created from, if any
    pub quotation_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Create a new bill from validated parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bill_number: String,
        date: NaiveDate,
        customer_name: String,
        customer_phone: String,
        customer_address: Option<String>,
        items: Vec<LineItem>,
        discount: Discount,
        totals: BillTotals,
        notes: Option<String>,
        quotation_id: Option<String>,
    ) -> Self {
        let now = Utc::now();

        let mut bill = Self {
            id: Uuid::new_v4().to_string(),
            bill_number,
            date,
            customer_name,
            customer_phone,
            customer_address,
            items,
            subtotal: Decimal::ZERO,
            discount_type: discount.kind(),
            discount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            amount_received: Decimal::ZERO,
            remaining_amount: Decimal::ZERO,
            notes,
            status: PaymentStatus::Pending,
            quotation_id,
            created_at: now,
            updated_at: now,
        };
        bill.apply_totals(discount, totals);
        bill
    }

    /// Number suggested when the client does not send one
    pub fn suggest_number(now: DateTime<Utc>) -> String {
        format!("INV-{}", now.timestamp_millis())
    }

    /// The discount as the admin entered it
    pub fn entered_discount(&self) -> Discount {
        Discount::from_stored(self.discount_type, self.discount, self.discount_amount)
    }

    /// Overwrite every computed figure, including the derived status
    pub fn apply_totals(&mut self, discount: Discount, totals: BillTotals) {
        self.discount_type = discount.kind();
        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.discount_amount = totals.discount_amount;
        self.tax_rate = totals.tax_rate;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        self.amount_received = totals.amount_received;
        self.remaining_amount = totals.remaining_amount;
        self.status = totals.status;
    }
}

fn validate_customer(
    name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<()> {
    if let Some(name) = name {
        validation::require_text("Customer name", name, 100)?;
    }
    if let Some(phone) = phone {
        validation::require_text("Customer phone", phone, 30)?;
    }
    validation::optional_text("Customer address", address, 255)
}

fn validate_received(amount_received: Option<Decimal>) -> Result<()> {
    match amount_received {
        Some(amount) => {
            money::ensure_entry("Amount received", amount).map_err(AppError::Validation)
        }
        None => Ok(()),
    }
}

/// Request body for POST /api/bills. Also the shape of a quotation bill draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub bill_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub discount: Option<Discount>,
    pub tax_rate: Option<Decimal>,
    pub amount_received: Option<Decimal>,
    pub notes: Option<String>,
    pub quotation_id: Option<String>,
}

impl CreateBillRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(number) = &self.bill_number {
            validation::require_text("Bill number", number, 50)?;
        }
        validate_customer(
            Some(&self.customer_name),
            Some(&self.customer_phone),
            self.customer_address.as_deref(),
        )?;

        if self.items.is_empty() {
            return Err(AppError::validation("Bill must have at least one line item"));
        }

        validate_received(self.amount_received)
    }
}

/// Request body for PUT /api/bills/{id}. Absent fields keep their value.
///
/// `status` may only be `paid` (settle in full) or the status the figures
/// already imply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBillRequest {
    pub bill_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Option<Vec<LineItemInput>>,
    pub discount: Option<Discount>,
    pub tax_rate: Option<Decimal>,
    pub amount_received: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl UpdateBillRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(number) = &self.bill_number {
            validation::require_text("Bill number", number, 50)?;
        }
        validate_customer(
            self.customer_name.as_deref(),
            self.customer_phone.as_deref(),
            self.customer_address.as_deref(),
        )?;

        if matches!(&self.items, Some(items) if items.is_empty()) {
            return Err(AppError::validation("Bill must have at least one line item"));
        }

        validate_received(self.amount_received)
    }
}

/// Request body for POST /api/bills/{id}/payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
}

impl RecordPaymentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        money::ensure_entry("Payment amount", self.amount).map_err(AppError::Validation)
    }
}
