// Bills module
//
// Issued invoices with tax and payment tracking. A bill may carry a soft
// back-reference to the quotation it was created from.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Bill;
pub use repositories::{BillRepository, MySqlBillRepository};
pub use services::BillService;
