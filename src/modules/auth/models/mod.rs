mod admin;

pub use admin::{AdminUser, LoginRequest, LoginResponse};
