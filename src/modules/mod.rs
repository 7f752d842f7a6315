pub mod auth;
pub mod bills;
pub mod dashboard;
pub mod health;
pub mod pricing;
pub mod quotations;
pub mod submissions;
