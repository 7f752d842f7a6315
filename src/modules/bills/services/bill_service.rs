use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::core::{money, validation, AppError, ListFilter, Result};
use crate::modules::bills::models::{
    Bill, CreateBillRequest, RecordPaymentRequest, UpdateBillRequest,
};
use crate::modules::bills::repositories::BillRepository;
use crate::modules::pricing::{Discount, LineItem, PaymentStatus, TotalsCalculator};
use crate::modules::quotations::{QuotationRepository, QuotationStatus};

/// Service for bill business logic
pub struct BillService {
    bill_repo: Arc<dyn BillRepository>,
    quotation_repo: Arc<dyn QuotationRepository>,
    calculator: TotalsCalculator,
}

impl BillService {
    pub fn new(
        bill_repo: Arc<dyn BillRepository>,
        quotation_repo: Arc<dyn QuotationRepository>,
    ) -> Self {
        Self {
            bill_repo,
            quotation_repo,
            calculator: TotalsCalculator::new(),
        }
    }

    /// Create a new bill with computed totals
    ///
    /// When the request names a quotation, that quotation is marked
    /// `converted` afterwards. The link is best effort: failures there are
    /// logged and the bill stands.
    pub async fn create_bill(&self, request: CreateBillRequest) -> Result<Bill> {
        request.validate()?;

        let items = LineItem::from_inputs(&request.items)?;
        let discount = request.discount.unwrap_or_default();
        let totals = self.calculator.bill_totals(
            &items,
            discount,
            request.tax_rate.unwrap_or(Decimal::ZERO),
            request.amount_received.unwrap_or(Decimal::ZERO),
        )?;

        let now = Utc::now();
        let bill_number = request
            .bill_number
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| Bill::suggest_number(now));

        let bill = Bill::new(
            bill_number,
            request.date.unwrap_or_else(|| now.date_naive()),
            request.customer_name.trim().to_string(),
            request.customer_phone.trim().to_string(),
            validation::normalize_optional(request.customer_address),
            items,
            discount,
            totals,
            validation::normalize_optional(request.notes),
            validation::normalize_optional(request.quotation_id),
        );

        let created = self.bill_repo.create(&bill).await?;

        tracing::info!(
            bill_id = %created.id,
            bill_number = %created.bill_number,
            total = %money::format_amount(created.total),
            status = %created.status,
            "Bill created"
        );

        if let Some(quotation_id) = &created.quotation_id {
            self.mark_quotation_converted(quotation_id, &created.id).await;
        }

        Ok(created)
    }

    async fn mark_quotation_converted(&self, quotation_id: &str, bill_id: &str) {
        match self.quotation_repo.find_by_id(quotation_id).await {
            Ok(Some(_)) => {
                match self
                    .quotation_repo
                    .update_status(quotation_id, QuotationStatus::Converted)
                    .await
                {
                    Ok(()) => tracing::info!(
                        quotation_id = %quotation_id,
                        bill_id = %bill_id,
                        "Quotation converted to bill"
                    ),
                    Err(e) => tracing::warn!(
                        quotation_id = %quotation_id,
                        bill_id = %bill_id,
                        error = %e,
                        "Failed to mark quotation as converted"
                    ),
                }
            }
            Ok(None) => tracing::warn!(
                quotation_id = %quotation_id,
                bill_id = %bill_id,
                "Bill references a quotation that does not exist"
            ),
            Err(e) => tracing::warn!(
                quotation_id = %quotation_id,
                bill_id = %bill_id,
                error = %e,
                "Failed to load quotation for conversion"
            ),
        }
    }

    /// Get bill by ID
    pub async fn get_bill(&self, id: &str) -> Result<Bill> {
        self.bill_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Bill not found"))
    }

    /// List bills, newest first
    pub async fn list_bills(
        &self,
        search: Option<String>,
        status: Option<String>,
    ) -> Result<Vec<Bill>> {
        let filter = ListFilter::<PaymentStatus>::parse(search, status)?;
        self.bill_repo.list(&filter).await
    }

    /// Merge the fields present in the request, then recompute totals and status
    pub async fn update_bill(&self, id: &str, request: UpdateBillRequest) -> Result<Bill> {
        request.validate()?;

        let mut bill = self.get_bill(id).await?;

        if let Some(number) = request.bill_number {
            bill.bill_number = number.trim().to_string();
        }
        if let Some(date) = request.date {
            bill.date = date;
        }
        if let Some(name) = request.customer_name {
            bill.customer_name = name.trim().to_string();
        }
        if let Some(phone) = request.customer_phone {
            bill.customer_phone = phone.trim().to_string();
        }
        if request.customer_address.is_some() {
            bill.customer_address = validation::normalize_optional(request.customer_address);
        }
        if request.notes.is_some() {
            bill.notes = validation::normalize_optional(request.notes);
        }
        if let Some(items) = &request.items {
            bill.items = LineItem::from_inputs(items)?;
        }

        let discount = request.discount.unwrap_or_else(|| bill.entered_discount());
        let tax_rate = request.tax_rate.unwrap_or(bill.tax_rate);
        let received = request.amount_received.unwrap_or(bill.amount_received);
        self.recalculate(&mut bill, discount, tax_rate, received)?;

        match request.status {
            Some(PaymentStatus::Paid) => {
                let total = bill.total;
                self.recalculate(&mut bill, discount, tax_rate, total)?;
            }
            Some(requested) if requested != bill.status => {
                return Err(AppError::validation(format!(
                    "Status '{}' does not match the amounts; a bill with {} received of {} is {}",
                    requested,
                    money::format_amount(bill.amount_received),
                    money::format_amount(bill.total),
                    bill.status
                )));
            }
            _ => {}
        }

        let updated = self.bill_repo.update(&bill).await?;

        tracing::info!(
            bill_id = %updated.id,
            total = %money::format_amount(updated.total),
            status = %updated.status,
            "Bill updated"
        );

        Ok(updated)
    }

    /// Add a payment to the amount received
    pub async fn record_payment(&self, id: &str, request: RecordPaymentRequest) -> Result<Bill> {
        request.validate()?;

        let mut bill = self.get_bill(id).await?;
        let discount = bill.entered_discount();
        let tax_rate = bill.tax_rate;
        let received = money::checked(
            "Amount received",
            bill.amount_received.checked_add(request.amount),
        )
        .map_err(AppError::Validation)?;
        self.recalculate(&mut bill, discount, tax_rate, received)?;

        let updated = self.bill_repo.update(&bill).await?;

        tracing::info!(
            bill_id = %updated.id,
            payment = %money::format_amount(request.amount),
            remaining = %money::format_amount(updated.remaining_amount),
            status = %updated.status,
            "Payment recorded"
        );

        Ok(updated)
    }

    /// Settle the bill in full: amount received becomes the total
    pub async fn mark_paid(&self, id: &str) -> Result<Bill> {
        let mut bill = self.get_bill(id).await?;
        let discount = bill.entered_discount();
        let tax_rate = bill.tax_rate;
        let total = bill.total;
        self.recalculate(&mut bill, discount, tax_rate, total)?;

        let updated = self.bill_repo.update(&bill).await?;

        tracing::info!(bill_id = %updated.id, "Bill marked as paid");

        Ok(updated)
    }

    pub async fn delete_bill(&self, id: &str) -> Result<()> {
        self.bill_repo.delete(id).await?;
        tracing::info!(bill_id = %id, "Bill deleted");
        Ok(())
    }

    fn recalculate(
        &self,
        bill: &mut Bill,
        discount: Discount,
        tax_rate: Decimal,
        amount_received: Decimal,
    ) -> Result<()> {
        let totals = self
            .calculator
            .bill_totals(&bill.items, discount, tax_rate, amount_received)?;
        bill.apply_totals(discount, totals);
        bill.updated_at = Utc::now();
        Ok(())
    }
}
