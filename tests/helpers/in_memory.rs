// In-memory repositories
//
// Same contracts as the MySQL repositories: unique document numbers, newest
// first listing, NotFound on unknown ids.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use wazir_backoffice::core::{AppError, ListFilter, Result};
use wazir_backoffice::modules::auth::{AdminRepository, AdminUser};
use wazir_backoffice::modules::bills::{Bill, BillRepository};
use wazir_backoffice::modules::pricing::PaymentStatus;
use wazir_backoffice::modules::quotations::{Quotation, QuotationRepository, QuotationStatus};
use wazir_backoffice::modules::submissions::{QuoteRequest, QuoteRequestRepository};

/// Case-insensitive substring match, the in-memory counterpart of the
/// `LIKE` clause the MySQL repositories build
pub fn matches_search<S>(filter: &ListFilter<S>, fields: &[&str]) -> bool {
    match &filter.search {
        None => true,
        Some(term) => {
            let needle = term.to_lowercase();
            fields
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        }
    }
}

fn newest_first<T: Clone>(mut docs: Vec<(chrono::DateTime<Utc>, usize, T)>) -> Vec<T> {
    // Insertion order breaks ties between equal timestamps
    docs.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    docs.into_iter().map(|(_, _, doc)| doc).collect()
}

#[derive(Default)]
pub struct InMemoryQuotationRepository {
    quotations: Mutex<Vec<Quotation>>,
    /// When set, status updates fail as a storage error would
    status_updates_fail: Mutex<bool>,
}

impl InMemoryQuotationRepository {
    pub fn all(&self) -> Vec<Quotation> {
        self.quotations.lock().unwrap().clone()
    }

    pub fn fail_status_updates(&self) {
        *self.status_updates_fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn create(&self, quotation: &Quotation) -> Result<Quotation> {
        let mut quotations = self.quotations.lock().unwrap();
        if quotations
            .iter()
            .any(|q| q.quotation_number == quotation.quotation_number)
        {
            return Err(AppError::validation(format!(
                "Quotation with number '{}' already exists",
                quotation.quotation_number
            )));
        }
        quotations.push(quotation.clone());
        Ok(quotation.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Quotation>> {
        Ok(self
            .quotations
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list(&self, filter: &ListFilter<QuotationStatus>) -> Result<Vec<Quotation>> {
        let quotations = self.quotations.lock().unwrap();
        let matching = quotations
            .iter()
            .enumerate()
            .filter(|(_, q)| filter.status.map_or(true, |s| q.status == s))
            .filter(|(_, q)| {
                matches_search(
                    filter,
                    &[
                        q.customer_name.as_str(),
                        q.customer_phone.as_str(),
                        q.quotation_number.as_str(),
                    ],
                )
            })
            .map(|(idx, q)| (q.created_at, idx, q.clone()))
            .collect();
        Ok(newest_first(matching))
    }

    async fn update(&self, quotation: &Quotation) -> Result<Quotation> {
        let mut quotations = self.quotations.lock().unwrap();
        if quotations
            .iter()
            .any(|q| q.id != quotation.id && q.quotation_number == quotation.quotation_number)
        {
            return Err(AppError::validation(format!(
                "Quotation with number '{}' already exists",
                quotation.quotation_number
            )));
        }
        let slot = quotations
            .iter_mut()
            .find(|q| q.id == quotation.id)
            .ok_or_else(|| AppError::not_found("Quotation not found"))?;
        *slot = quotation.clone();
        Ok(quotation.clone())
    }

    async fn update_status(&self, id: &str, status: QuotationStatus) -> Result<()> {
        if *self.status_updates_fail.lock().unwrap() {
            return Err(AppError::internal("simulated storage failure"));
        }
        let mut quotations = self.quotations.lock().unwrap();
        let slot = quotations
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::not_found("Quotation not found"))?;
        slot.status = status;
        slot.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut quotations = self.quotations.lock().unwrap();
        let before = quotations.len();
        quotations.retain(|q| q.id != id);
        if quotations.len() == before {
            return Err(AppError::not_found("Quotation not found"));
        }
        Ok(())
    }

    async fn count(&self, status: Option<QuotationStatus>) -> Result<i64> {
        Ok(self
            .quotations
            .lock()
            .unwrap()
            .iter()
            .filter(|q| status.map_or(true, |s| q.status == s))
            .count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryBillRepository {
    bills: Mutex<Vec<Bill>>,
}

impl InMemoryBillRepository {
    pub fn all(&self) -> Vec<Bill> {
        self.bills.lock().unwrap().clone()
    }
}

#[async_trait]
impl BillRepository for InMemoryBillRepository {
    async fn create(&self, bill: &Bill) -> Result<Bill> {
        let mut bills = self.bills.lock().unwrap();
        if bills.iter().any(|b| b.bill_number == bill.bill_number) {
            return Err(AppError::validation(format!(
                "Bill with number '{}' already exists",
                bill.bill_number
            )));
        }
        bills.push(bill.clone());
        Ok(bill.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Bill>> {
        Ok(self
            .bills
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn list(&self, filter: &ListFilter<PaymentStatus>) -> Result<Vec<Bill>> {
        let bills = self.bills.lock().unwrap();
        let matching = bills
            .iter()
            .enumerate()
            .filter(|(_, b)| filter.status.map_or(true, |s| b.status == s))
            .filter(|(_, b)| {
                matches_search(
                    filter,
                    &[
                        b.customer_name.as_str(),
                        b.customer_phone.as_str(),
                        b.bill_number.as_str(),
                    ],
                )
            })
            .map(|(idx, b)| (b.created_at, idx, b.clone()))
            .collect();
        Ok(newest_first(matching))
    }

    async fn update(&self, bill: &Bill) -> Result<Bill> {
        let mut bills = self.bills.lock().unwrap();
        if bills
            .iter()
            .any(|b| b.id != bill.id && b.bill_number == bill.bill_number)
        {
            return Err(AppError::validation(format!(
                "Bill with number '{}' already exists",
                bill.bill_number
            )));
        }
        let slot = bills
            .iter_mut()
            .find(|b| b.id == bill.id)
            .ok_or_else(|| AppError::not_found("Bill not found"))?;
        *slot = bill.clone();
        Ok(bill.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut bills = self.bills.lock().unwrap();
        let before = bills.len();
        bills.retain(|b| b.id != id);
        if bills.len() == before {
            return Err(AppError::not_found("Bill not found"));
        }
        Ok(())
    }

    async fn count(&self, status: Option<PaymentStatus>) -> Result<i64> {
        Ok(self
            .bills
            .lock()
            .unwrap()
            .iter()
            .filter(|b| status.map_or(true, |s| b.status == s))
            .count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: Mutex<Vec<AdminUser>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create(&self, admin: &AdminUser) -> Result<AdminUser> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.username == admin.username) {
            return Err(AppError::validation(format!(
                "Admin '{}' already exists",
                admin.username
            )));
        }
        admins.push(admin.clone());
        Ok(admin.clone())
    }
}

#[derive(Default)]
pub struct InMemoryQuoteRequestRepository {
    requests: Mutex<Vec<QuoteRequest>>,
}

impl InMemoryQuoteRequestRepository {
    pub fn all(&self) -> Vec<QuoteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteRequestRepository for InMemoryQuoteRequestRepository {
    async fn create(&self, request: &QuoteRequest) -> Result<QuoteRequest> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(request.clone())
    }
}
