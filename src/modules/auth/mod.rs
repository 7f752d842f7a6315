// Auth module
//
// Single-admin login. A successful login returns a signed, time-limited bearer
// token that the `BearerAuth` middleware verifies on every protected request.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AdminUser, LoginRequest, LoginResponse};
pub use repositories::{AdminRepository, MySqlAdminRepository};
pub use services::{AuthService, TokenService};
