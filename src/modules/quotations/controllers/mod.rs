pub mod quotation_controller;

pub use quotation_controller::configure;
