pub mod submission_controller;

pub use submission_controller::configure;
