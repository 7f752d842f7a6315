use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{validation, Result};

/// Contact form body. Relayed by email only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<()> {
        validation::require_text("Name", &self.name, 100)?;
        validation::require_text("Phone", &self.phone, 30)?;
        validation::optional_text("Email", self.email.as_deref(), 255)?;
        validation::require_text("Message", &self.message, 5000)
    }
}

/// Quote request form body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: String,
    pub location: String,
    pub project_details: String,
}

impl QuoteSubmission {
    pub fn validate(&self) -> Result<()> {
        validation::require_text("Name", &self.name, 100)?;
        validation::require_text("Phone", &self.phone, 30)?;
        validation::optional_text("Email", self.email.as_deref(), 255)?;
        validation::require_text("Service type", &self.service_type, 100)?;
        validation::require_text("Location", &self.location, 255)?;
        validation::require_text("Project details", &self.project_details, 5000)
    }
}

/// Stored quote request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub service_type: String,
    pub location: String,
    pub project_details: String,
    pub created_at: DateTime<Utc>,
}

impl QuoteRequest {
    pub fn from_submission(submission: QuoteSubmission) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: submission.name.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            email: validation::normalize_optional(submission.email),
            service_type: submission.service_type.trim().to_string(),
            location: submission.location.trim().to_string(),
            project_details: submission.project_details.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Acknowledgement returned to the website
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
}
