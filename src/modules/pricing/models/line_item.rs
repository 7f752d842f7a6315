// A line item is one priced row of a quotation or bill.
//
// The amount is always quantity × rate. It is computed on construction and
// never read back from client input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, AppError, Result};

/// Measurement unit of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Square feet (area)
    Sft,
    /// Running feet (length)
    Rft,
    /// Pieces
    Pcs,
    Box,
    /// Kilograms (weight)
    Kg,
    /// Litres (volume)
    Ltr,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Sft
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Sft => write!(f, "sft"),
            Unit::Rft => write!(f, "rft"),
            Unit::Pcs => write!(f, "pcs"),
            Unit::Box => write!(f, "box"),
            Unit::Kg => write!(f, "kg"),
            Unit::Ltr => write!(f, "ltr"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sft" => Ok(Unit::Sft),
            "rft" => Ok(Unit::Rft),
            "pcs" => Ok(Unit::Pcs),
            "box" => Ok(Unit::Box),
            "kg" => Ok(Unit::Kg),
            "ltr" => Ok(Unit::Ltr),
            _ => Err(format!("Invalid unit: {}", s)),
        }
    }
}

/// Line item as submitted by a client. Any `amount` sent along is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: Unit,
    pub rate: Decimal,
}

/// Validated line item with its derived amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `description` - Work or material description (max 255 chars)
    /// * `quantity` - Non-negative, at most 4 decimal places
    /// * `unit` - Measurement unit
    /// * `rate` - Price per unit, non-negative, at most 4 decimal places
    pub fn new(description: String, quantity: Decimal, unit: Unit, rate: Decimal) -> Result<Self> {
        Self::validate_description(&description)?;
        money::ensure_entry("Quantity", quantity).map_err(AppError::Validation)?;
        money::ensure_entry("Rate", rate).map_err(AppError::Validation)?;

        let amount = money::checked("Amount", quantity.checked_mul(rate))
            .map_err(AppError::Validation)?;

        Ok(Self {
            description: description.trim().to_string(),
            quantity,
            unit,
            rate,
            amount,
        })
    }

    /// Validate a batch of client line items, keeping their order
    pub fn from_inputs(inputs: &[LineItemInput]) -> Result<Vec<Self>> {
        inputs
            .iter()
            .enumerate()
            .map(|(idx, input)| {
                Self::new(
                    input.description.clone(),
                    input.quantity,
                    input.unit,
                    input.rate,
                )
                .map_err(|e| match e {
                    AppError::Validation(msg) => {
                        AppError::Validation(format!("Line item {}: {}", idx + 1, msg))
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Rebuild a line item from a storage row
    ///
    /// The amount is recomputed from quantity and rate; a stored amount that
    /// disagrees is logged and replaced.
    pub fn from_stored(
        description: String,
        quantity: Decimal,
        unit: &str,
        rate: Decimal,
        stored_amount: Decimal,
    ) -> Result<Self> {
        let unit = unit
            .parse::<Unit>()
            .map_err(|e| AppError::internal(format!("Invalid unit in database: {}", e)))?;

        let amount = quantity
            .checked_mul(rate)
            .ok_or_else(|| AppError::internal("Stored line item amount overflows"))?;

        if amount != stored_amount {
            tracing::warn!(
                %quantity,
                %rate,
                %stored_amount,
                "Stored line item amount differs from quantity x rate"
            );
        }

        Ok(Self {
            description,
            quantity,
            unit,
            rate,
            amount,
        })
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().is_empty() {
            return Err(AppError::validation(
                "Line item description cannot be empty",
            ));
        }

        if description.len() > 255 {
            return Err(AppError::validation(
                "Line item description cannot exceed 255 characters",
            ));
        }

        Ok(())
    }
}

impl From<&LineItem> for LineItemInput {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit,
            rate: item.rate,
        }
    }
}
