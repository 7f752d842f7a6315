// Dashboard module
//
// Document counts for the admin landing page.

pub mod controllers;
pub mod services;

pub use services::{DashboardService, DashboardSummary};
