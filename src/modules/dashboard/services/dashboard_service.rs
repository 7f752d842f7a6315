use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::bills::BillRepository;
use crate::modules::pricing::PaymentStatus;
use crate::modules::quotations::{QuotationRepository, QuotationStatus};

/// Document counts shown on the admin landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_bills: i64,
    pub total_quotations: i64,
    pub pending_bills: i64,
    pub pending_quotations: i64,
}

pub struct DashboardService {
    bill_repo: Arc<dyn BillRepository>,
    quotation_repo: Arc<dyn QuotationRepository>,
}

impl DashboardService {
    pub fn new(
        bill_repo: Arc<dyn BillRepository>,
        quotation_repo: Arc<dyn QuotationRepository>,
    ) -> Self {
        Self {
            bill_repo,
            quotation_repo,
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        let (total_bills, pending_bills, total_quotations, pending_quotations) = tokio::try_join!(
            self.bill_repo.count(None),
            self.bill_repo.count(Some(PaymentStatus::Pending)),
            self.quotation_repo.count(None),
            self.quotation_repo.count(Some(QuotationStatus::Pending)),
        )?;

        Ok(DashboardSummary {
            total_bills,
            total_quotations,
            pending_bills,
            pending_quotations,
        })
    }
}
