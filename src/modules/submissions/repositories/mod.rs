pub mod quote_request_repository;

pub use quote_request_repository::{MySqlQuoteRequestRepository, QuoteRequestRepository};
