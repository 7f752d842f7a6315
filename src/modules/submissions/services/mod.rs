pub mod mailer;
pub mod submission_service;

pub use mailer::{EmailMessage, Mailer, SmtpMailer};
pub use submission_service::SubmissionService;
