// Test context
//
// Builds the same `AppState` as `main`, over in-memory repositories, and
// keeps handles on the fakes so tests can inspect stored state.

use std::sync::Arc;

use wazir_backoffice::modules::auth::TokenService;
use wazir_backoffice::startup::{AppState, Repositories};

use super::in_memory::*;
use super::mock_mailer::MockMailer;

pub const TEST_JWT_SECRET: &str = "test-secret-for-wazir-backoffice-32b";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "wazir-glass-2024";

pub struct TestContext {
    pub state: AppState,
    pub quotations: Arc<InMemoryQuotationRepository>,
    pub bills: Arc<InMemoryBillRepository>,
    pub quote_requests: Arc<InMemoryQuoteRequestRepository>,
    pub mailer: Arc<MockMailer>,
    pub tokens: TokenService,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_rate_limit(1000)
    }

    pub fn with_rate_limit(rate_limit_per_minute: u32) -> Self {
        let quotations = Arc::new(InMemoryQuotationRepository::default());
        let bills = Arc::new(InMemoryBillRepository::default());
        let quote_requests = Arc::new(InMemoryQuoteRequestRepository::default());
        let mailer = Arc::new(MockMailer::default());
        let tokens = TokenService::new(TEST_JWT_SECRET, 30);

        let repos = Repositories {
            admins: Arc::new(InMemoryAdminRepository::default()),
            quotations: quotations.clone(),
            bills: bills.clone(),
            quote_requests: quote_requests.clone(),
        };

        let state = AppState::new(repos, mailer.clone(), tokens.clone(), rate_limit_per_minute);

        Self {
            state,
            quotations,
            bills,
            quote_requests,
            mailer,
            tokens,
        }
    }

    /// Context with the default admin account already created
    pub async fn with_admin() -> Self {
        let ctx = Self::new();
        ctx.state
            .auth
            .ensure_admin(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD)
            .await
            .expect("Failed to create test admin");
        ctx
    }

    /// `Authorization` header value for a valid session
    pub fn bearer(&self) -> (String, String) {
        let token = self
            .tokens
            .issue("test-admin")
            .expect("Failed to issue test token");
        ("Authorization".to_string(), format!("Bearer {}", token))
    }
}
