pub mod error;
pub mod filter;
pub mod money;
pub mod validation;

pub use error::{AppError, Result};
pub use filter::ListFilter;
