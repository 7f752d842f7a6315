use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::core::{money, validation, AppError, ListFilter, Result};
use crate::modules::bills::models::CreateBillRequest;
use crate::modules::pricing::{LineItem, LineItemInput, TotalsCalculator};
use crate::modules::quotations::models::{
    CreateQuotationRequest, Quotation, QuotationStatus, UpdateQuotationRequest,
};
use crate::modules::quotations::repositories::QuotationRepository;

/// Service for quotation business logic
pub struct QuotationService {
    quotation_repo: Arc<dyn QuotationRepository>,
    calculator: TotalsCalculator,
}

impl QuotationService {
    pub fn new(quotation_repo: Arc<dyn QuotationRepository>) -> Self {
        Self {
            quotation_repo,
            calculator: TotalsCalculator::new(),
        }
    }

    /// Create a new pending quotation with computed totals
    pub async fn create_quotation(&self, request: CreateQuotationRequest) -> Result<Quotation> {
        request.validate()?;

        let items = LineItem::from_inputs(&request.items)?;
        let discount = request.discount.unwrap_or_default();
        let totals = self.calculator.quotation_totals(&items, discount)?;

        let now = Utc::now();
        let quotation_number = request
            .quotation_number
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| Quotation::suggest_number(now));

        let quotation = Quotation::new(
            quotation_number,
            request.date.unwrap_or_else(|| now.date_naive()),
            request.customer_name.trim().to_string(),
            request.customer_phone.trim().to_string(),
            validation::normalize_optional(request.customer_address),
            items,
            discount,
            totals,
            validation::normalize_optional(request.notes),
        );

        let created = self.quotation_repo.create(&quotation).await?;

        tracing::info!(
            quotation_id = %created.id,
            quotation_number = %created.quotation_number,
            total = %money::format_amount(created.total),
            "Quotation created"
        );

        Ok(created)
    }

    /// Get quotation by ID
    pub async fn get_quotation(&self, id: &str) -> Result<Quotation> {
        self.quotation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Quotation not found"))
    }

    /// List quotations, newest first
    pub async fn list_quotations(
        &self,
        search: Option<String>,
        status: Option<String>,
    ) -> Result<Vec<Quotation>> {
        let filter = ListFilter::<QuotationStatus>::parse(search, status)?;
        self.quotation_repo.list(&filter).await
    }

    /// Merge the fields present in the request, then recompute totals
    pub async fn update_quotation(
        &self,
        id: &str,
        request: UpdateQuotationRequest,
    ) -> Result<Quotation> {
        request.validate()?;

        let mut quotation = self.get_quotation(id).await?;

        if let Some(number) = request.quotation_number {
            quotation.quotation_number = number.trim().to_string();
        }
        if let Some(date) = request.date {
            quotation.date = date;
        }
        if let Some(name) = request.customer_name {
            quotation.customer_name = name.trim().to_string();
        }
        if let Some(phone) = request.customer_phone {
            quotation.customer_phone = phone.trim().to_string();
        }
        if request.customer_address.is_some() {
            quotation.customer_address = validation::normalize_optional(request.customer_address);
        }
        if request.notes.is_some() {
            quotation.notes = validation::normalize_optional(request.notes);
        }
        if let Some(items) = &request.items {
            quotation.items = LineItem::from_inputs(items)?;
        }
        if let Some(status) = request.status {
            quotation.change_status(status)?;
        }

        let discount = request.discount.unwrap_or_else(|| quotation.entered_discount());
        let totals = self.calculator.quotation_totals(&quotation.items, discount)?;
        quotation.apply_totals(discount, totals);
        quotation.updated_at = Utc::now();

        let updated = self.quotation_repo.update(&quotation).await?;

        tracing::info!(
            quotation_id = %updated.id,
            status = %updated.status,
            "Quotation updated"
        );

        Ok(updated)
    }

    pub async fn delete_quotation(&self, id: &str) -> Result<()> {
        self.quotation_repo.delete(id).await?;
        tracing::info!(quotation_id = %id, "Quotation deleted");
        Ok(())
    }

    /// Prefilled bill payload for a quotation. The bill is not stored.
    pub async fn draft_bill(&self, id: &str) -> Result<CreateBillRequest> {
        let quotation = self.get_quotation(id).await?;

        if !quotation.is_billable() {
            return Err(AppError::validation(format!(
                "Quotation {} is {} and cannot be billed",
                quotation.quotation_number, quotation.status
            )));
        }

        let mut notes = format!("Generated from Quotation #{}", quotation.quotation_number);
        if let Some(existing) = &quotation.notes {
            notes.push_str("\n\n");
            notes.push_str(existing);
        }

        Ok(CreateBillRequest {
            bill_number: None,
            date: None,
            customer_name: quotation.customer_name.clone(),
            customer_phone: quotation.customer_phone.clone(),
            customer_address: quotation.customer_address.clone(),
            items: quotation.items.iter().map(LineItemInput::from).collect(),
            discount: Some(quotation.entered_discount()),
            tax_rate: Some(Decimal::ZERO),
            amount_received: Some(Decimal::ZERO),
            notes: Some(notes),
            quotation_id: Some(quotation.id.clone()),
        })
    }
}
