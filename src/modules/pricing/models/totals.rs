use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status of a bill, derived from amount received vs total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Nothing received yet
    Pending,
    /// Partially paid (0 < received < total)
    Advanced,
    /// Fully paid
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Advanced => write!(f, "advanced"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "advanced" => Ok(PaymentStatus::Advanced),
            "paid" => Ok(PaymentStatus::Paid),
            _ => Err(format!("Invalid bill status: {}", s)),
        }
    }
}

/// Both sides of a discount after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountBreakdown {
    /// Discount as a percentage of the subtotal
    pub percentage: Decimal,
    /// Discount as an absolute amount
    pub amount: Decimal,
}

/// Computed figures of a quotation (no tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

/// Computed figures of a bill, including the settled payment and its status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub discount_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    /// Never above `total`
    pub amount_received: Decimal,
    /// Never below zero
    pub remaining_amount: Decimal,
    pub status: PaymentStatus,
}
