use rust_decimal::Decimal;

use crate::core::money::{self, HUNDRED};
use crate::core::{AppError, Result};
use crate::modules::pricing::models::{
    BillTotals, Discount, DiscountBreakdown, LineItem, PaymentStatus, QuotationTotals,
};

/// TotalsCalculator turns line items, a discount, a tax rate and the amount
/// received into document totals and a payment status.
///
/// All arithmetic is exact; rounding to two places is left to display code.
pub struct TotalsCalculator;

impl TotalsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Sum of item amounts
    pub fn subtotal(&self, items: &[LineItem]) -> Result<Decimal> {
        items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| {
                money::checked("Subtotal", acc.checked_add(item.amount))
            })
            .map_err(AppError::Validation)
    }

    /// Percentage equivalent of an absolute discount. A zero subtotal gives 0.
    pub fn percentage_of(&self, amount: Decimal, subtotal: Decimal) -> Result<Decimal> {
        if subtotal <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        amount
            .checked_div(subtotal)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .ok_or_else(|| AppError::validation("Discount percentage is too large to compute"))
    }

    /// Normalize a discount into both its percentage and amount forms
    pub fn apply_discount(&self, subtotal: Decimal, discount: Discount) -> Result<DiscountBreakdown> {
        match discount {
            Discount::Percentage(percentage) => {
                money::ensure_percentage("Discount percentage", percentage)
                    .and_then(|_| money::ensure_entry_scale("Discount percentage", percentage))
                    .map_err(AppError::Validation)?;

                let amount = money::checked(
                    "Discount amount",
                    subtotal
                        .checked_mul(percentage)
                        .and_then(|v| v.checked_div(HUNDRED))
                        .map(money::round_stored),
                )
                .map_err(AppError::Validation)?;

                Ok(DiscountBreakdown { percentage, amount })
            }
            Discount::Amount(amount) => {
                money::ensure_entry("Discount amount", amount).map_err(AppError::Validation)?;

                if amount > subtotal {
                    return Err(AppError::validation(format!(
                        "Discount amount {} cannot exceed subtotal {}",
                        amount, subtotal
                    )));
                }

                Ok(DiscountBreakdown {
                    percentage: self.percentage_of(amount, subtotal)?,
                    amount,
                })
            }
        }
    }

    /// Totals of a quotation: total = subtotal - discount
    pub fn quotation_totals(&self, items: &[LineItem], discount: Discount) -> Result<QuotationTotals> {
        let subtotal = self.subtotal(items)?;
        let breakdown = self.apply_discount(subtotal, discount)?;

        Ok(QuotationTotals {
            subtotal,
            discount: breakdown.percentage,
            discount_amount: breakdown.amount,
            total: subtotal - breakdown.amount,
        })
    }

    /// Totals of a bill: discount, then tax on the discounted amount, then the
    /// settled payment and its derived status
    pub fn bill_totals(
        &self,
        items: &[LineItem],
        discount: Discount,
        tax_rate: Decimal,
        amount_received: Decimal,
    ) -> Result<BillTotals> {
        money::ensure_percentage("Tax rate", tax_rate)
            .and_then(|_| money::ensure_entry_scale("Tax rate", tax_rate))
            .map_err(AppError::Validation)?;
        money::ensure_non_negative("Amount received", amount_received)
            .map_err(AppError::Validation)?;

        let subtotal = self.subtotal(items)?;
        let breakdown = self.apply_discount(subtotal, discount)?;
        let after_discount = subtotal - breakdown.amount;
        let tax_amount = money::checked(
            "Tax amount",
            after_discount
                .checked_mul(tax_rate)
                .and_then(|v| v.checked_div(HUNDRED))
                .map(money::round_stored),
        )
        .map_err(AppError::Validation)?;
        let total = money::checked("Total", after_discount.checked_add(tax_amount))
            .map_err(AppError::Validation)?;

        let (amount_received, remaining_amount) = self.settle(total, amount_received);

        Ok(BillTotals {
            subtotal,
            discount: breakdown.percentage,
            discount_amount: breakdown.amount,
            tax_rate,
            tax_amount,
            total,
            amount_received,
            remaining_amount,
            status: self.derive_status(amount_received, total),
        })
    }

    /// Cap the amount received at the total and compute what is left to pay
    ///
    /// # Returns
    /// * `(amount_received, remaining_amount)` with received <= total and remaining >= 0
    pub fn settle(&self, total: Decimal, amount_received: Decimal) -> (Decimal, Decimal) {
        let received = if amount_received >= total {
            total
        } else {
            amount_received
        };
        let remaining = (total - received).max(Decimal::ZERO);

        (received, remaining)
    }

    /// Status as a pure function of (amount received, total)
    pub fn derive_status(&self, amount_received: Decimal, total: Decimal) -> PaymentStatus {
        if amount_received <= Decimal::ZERO {
            PaymentStatus::Pending
        } else if amount_received >= total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Advanced
        }
    }
}

impl Default for TotalsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
