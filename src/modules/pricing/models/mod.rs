mod discount;
mod line_item;
mod totals;

pub use discount::{Discount, DiscountKind};
pub use line_item::{LineItem, LineItemInput, Unit};
pub use totals::{BillTotals, DiscountBreakdown, PaymentStatus, QuotationTotals};
