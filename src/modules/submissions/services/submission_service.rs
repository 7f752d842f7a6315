use std::sync::Arc;

use crate::core::Result;
use crate::modules::submissions::models::{
    ContactSubmission, QuoteRequest, QuoteSubmission, SubmissionReceipt,
};
use crate::modules::submissions::repositories::QuoteRequestRepository;
use crate::modules::submissions::services::{EmailMessage, Mailer};

const NOT_PROVIDED: &str = "Not provided";

/// Service for public website submissions
pub struct SubmissionService {
    quote_repo: Arc<dyn QuoteRequestRepository>,
    mailer: Arc<dyn Mailer>,
}

impl SubmissionService {
    pub fn new(quote_repo: Arc<dyn QuoteRequestRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { quote_repo, mailer }
    }

    /// Relay a contact message to the business inbox
    pub async fn submit_contact(&self, contact: ContactSubmission) -> Result<SubmissionReceipt> {
        contact.validate()?;

        let email = contact
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        let body = format!(
            "New Contact Message\n\nName: {}\nPhone: {}\nEmail: {}\n\nMessage:\n{}\n",
            contact.name.trim(),
            contact.phone.trim(),
            email.unwrap_or(NOT_PROVIDED),
            contact.message.trim(),
        );

        self.mailer
            .send(EmailMessage {
                from_name: contact.name.trim().to_string(),
                subject: "New Contact Form Submission - Wazir Glass".to_string(),
                body,
                reply_to: email.map(str::to_string),
            })
            .await?;

        tracing::info!("Contact message relayed");

        Ok(SubmissionReceipt {
            message: "Message sent successfully".to_string(),
        })
    }

    /// Store a quote request, then notify the business inbox
    ///
    /// The stored request is kept when the email fails.
    pub async fn submit_quote(&self, submission: QuoteSubmission) -> Result<SubmissionReceipt> {
        submission.validate()?;

        let request = self
            .quote_repo
            .create(&QuoteRequest::from_submission(submission))
            .await?;

        tracing::info!(
            quote_request_id = %request.id,
            service_type = %request.service_type,
            "Quote request stored"
        );

        let body = format!(
            "New Quote Request\n\nName: {}\nPhone: {}\nEmail: {}\nService Type: {}\nLocation: {}\n\nProject Details:\n{}\n",
            request.name,
            request.phone,
            request.email.as_deref().unwrap_or(NOT_PROVIDED),
            request.service_type,
            request.location,
            request.project_details,
        );

        self.mailer
            .send(EmailMessage {
                from_name: "Quote Request".to_string(),
                subject: "New Quote Request - Wazir Glass".to_string(),
                body,
                reply_to: request.email.clone(),
            })
            .await
            .map_err(|e| {
                tracing::warn!(
                    quote_request_id = %request.id,
                    error = %e,
                    "Quote request stored but notification failed"
                );
                e
            })?;

        Ok(SubmissionReceipt {
            message: "Quote request submitted successfully".to_string(),
        })
    }
}
