// Submissions module
//
// Public contact and quote-request forms. Both notify the business by email;
// quote requests are stored first.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ContactSubmission, QuoteRequest, QuoteSubmission};
pub use repositories::{MySqlQuoteRequestRepository, QuoteRequestRepository};
pub use services::{EmailMessage, Mailer, SmtpMailer, SubmissionService};
