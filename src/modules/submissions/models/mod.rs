mod submission;

pub use submission::{ContactSubmission, QuoteRequest, QuoteSubmission, SubmissionReceipt};
