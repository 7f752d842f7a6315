mod bill;

pub use bill::{Bill, CreateBillRequest, RecordPaymentRequest, UpdateBillRequest};
