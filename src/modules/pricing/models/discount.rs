use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount as entered by the admin: either a percentage of the subtotal or
/// an absolute amount. The other form is always derived from the subtotal.
///
/// Wire form: `{"type": "percentage", "value": "10"}` or
/// `{"type": "amount", "value": "125"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Discount {
    Percentage(Decimal),
    Amount(Decimal),
}

impl Default for Discount {
    fn default() -> Self {
        Discount::Percentage(Decimal::ZERO)
    }
}

impl Discount {
    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Percentage(_) => DiscountKind::Percentage,
            Discount::Amount(_) => DiscountKind::Amount,
        }
    }

    /// Rebuild the admin's original discount from persisted columns
    pub fn from_stored(kind: DiscountKind, percentage: Decimal, amount: Decimal) -> Self {
        match kind {
            DiscountKind::Percentage => Discount::Percentage(percentage),
            DiscountKind::Amount => Discount::Amount(amount),
        }
    }
}

/// Which side of the discount the admin entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Amount,
}

impl Default for DiscountKind {
    fn default() -> Self {
        DiscountKind::Percentage
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::Amount => write!(f, "amount"),
        }
    }
}

impl std::str::FromStr for DiscountKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountKind::Percentage),
            "amount" => Ok(DiscountKind::Amount),
            _ => Err(format!("Invalid discount type: {}", s)),
        }
    }
}
