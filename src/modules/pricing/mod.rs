// Pricing module
//
// Line items, discount normalization, tax and payment-status derivation shared
// by quotations and bills. Everything here is a pure function of its inputs.

pub mod models;
pub mod services;

pub use models::{
    BillTotals, Discount, DiscountKind, LineItem, LineItemInput, PaymentStatus, QuotationTotals,
    Unit,
};
pub use services::TotalsCalculator;
