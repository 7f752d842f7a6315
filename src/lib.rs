//! Wazir Glass back office
//!
//! Quotation and bill management for a glass and aluminium contractor:
//! pricing and payment-status calculation, document CRUD behind an admin
//! bearer token, and the public website submission endpoints.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod startup;

// Re-export commonly used types
pub use modules::bills;
pub use modules::pricing;
pub use modules::quotations;
