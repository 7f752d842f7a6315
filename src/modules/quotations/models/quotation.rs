// A quotation is a non-binding priced proposal for a prospective customer.
//
// Quotations carry no tax. Their status moves between pending, accepted and
// rejected by admin action and becomes `converted` only when a bill is
// created from them. `converted` is terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{validation, AppError, Result};
use crate::modules::pricing::{Discount, DiscountKind, LineItem, LineItemInput, QuotationTotals};

/// Quotation status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    /// Sent to the customer, no answer yet
    Pending,
    Accepted,
    Rejected,
    /// A bill was created from this quotation
    Converted,
}

impl Default for QuotationStatus {
    fn default() -> Self {
        QuotationStatus::Pending
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotationStatus::Pending => write!(f, "pending"),
            QuotationStatus::Accepted => write!(f, "accepted"),
            QuotationStatus::Rejected => write!(f, "rejected"),
            QuotationStatus::Converted => write!(f, "converted"),
        }
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuotationStatus::Pending),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            "converted" => Ok(QuotationStatus::Converted),
            _ => Err(format!("Invalid quotation status: {}", s)),
        }
    }
}

/// Represents a stored quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub quotation_number: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    /// Which side of the discount the admin entered
    pub discount_type: DiscountKind,
    /// Discount percentage (given or derived)
    pub discount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quotation {
    /// Create a new pending quotation from validated parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quotation_number: String,
        date: NaiveDate,
        customer_name: String,
        customer_phone: String,
        customer_address: Option<String>,
        items: Vec<LineItem>,
        discount: Discount,
        totals: QuotationTotals,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            quotation_number,
            date,
            customer_name,
            customer_phone,
            customer_address,
            items,
            subtotal: totals.subtotal,
            discount_type: discount.kind(),
            discount: totals.discount,
            discount_amount: totals.discount_amount,
            total: totals.total,
            notes,
            status: QuotationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number suggested when the client does not send one
    pub fn suggest_number(now: DateTime<Utc>) -> String {
        format!("QTN-{}", now.timestamp_millis())
    }

    /// The discount as the admin entered it
    pub fn entered_discount(&self) -> Discount {
        Discount::from_stored(self.discount_type, self.discount, self.discount_amount)
    }

    /// Overwrite the computed figures
    pub fn apply_totals(&mut self, discount: Discount, totals: QuotationTotals) {
        self.discount_type = discount.kind();
        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.discount_amount = totals.discount_amount;
        self.total = totals.total;
    }

    /// Admin-driven status change
    ///
    /// `converted` can only be reached through bill creation and is final.
    pub fn change_status(&mut self, new_status: QuotationStatus) -> Result<()> {
        if self.status == new_status {
            return Ok(());
        }

        match (self.status, new_status) {
            (QuotationStatus::Converted, _) => Err(AppError::validation(format!(
                "Quotation {} is already converted to a bill; its status cannot change",
                self.quotation_number
            ))),
            (_, QuotationStatus::Converted) => Err(AppError::validation(
                "A quotation becomes converted only when a bill is created from it",
            )),
            _ => {
                self.status = new_status;
                Ok(())
            }
        }
    }

    /// Whether a bill may still be drafted from this quotation
    pub fn is_billable(&self) -> bool {
        matches!(
            self.status,
            QuotationStatus::Pending | QuotationStatus::Accepted
        )
    }
}

/// Request body for POST /api/quotations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub quotation_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub discount: Option<Discount>,
    pub notes: Option<String>,
}

impl CreateQuotationRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(number) = &self.quotation_number {
            validation::require_text("Quotation number", number, 50)?;
        }
        validation::require_text("Customer name", &self.customer_name, 100)?;
        validation::require_text("Customer phone", &self.customer_phone, 30)?;
        validation::optional_text("Customer address", self.customer_address.as_deref(), 255)?;

        if self.items.is_empty() {
            return Err(AppError::validation(
                "Quotation must have at least one line item",
            ));
        }

        Ok(())
    }
}

/// Request body for PUT /api/quotations/{id}. Absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotationRequest {
    pub quotation_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Option<Vec<LineItemInput>>,
    pub discount: Option<Discount>,
    pub notes: Option<String>,
    pub status: Option<QuotationStatus>,
}

impl UpdateQuotationRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(number) = &self.quotation_number {
            validation::require_text("Quotation number", number, 50)?;
        }
        if let Some(name) = &self.customer_name {
            validation::require_text("Customer name", name, 100)?;
        }
        if let Some(phone) = &self.customer_phone {
            validation::require_text("Customer phone", phone, 30)?;
        }
        validation::optional_text("Customer address", self.customer_address.as_deref(), 255)?;

        if matches!(&self.items, Some(items) if items.is_empty()) {
            return Err(AppError::validation(
                "Quotation must have at least one line item",
            ));
        }

        Ok(())
    }
}
