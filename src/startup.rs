// Application wiring: repositories, services and the route table.
//
// `main` builds an `AppState` once and calls `configure` for every worker's
// `App`. Tests build the same state over in-memory repositories.

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::middleware::{
    json_error_handler, path_error_handler, query_error_handler, BearerAuth, RateLimiter,
};
use crate::modules::auth::{AdminRepository, AuthService, MySqlAdminRepository, TokenService};
use crate::modules::bills::{BillRepository, BillService, MySqlBillRepository};
use crate::modules::dashboard::DashboardService;
use crate::modules::quotations::{MySqlQuotationRepository, QuotationRepository, QuotationService};
use crate::modules::submissions::{
    Mailer, MySqlQuoteRequestRepository, QuoteRequestRepository, SubmissionService,
};
use crate::modules::{auth, bills, dashboard, health, quotations, submissions};

/// Storage backends for every module
#[derive(Clone)]
pub struct Repositories {
    pub admins: Arc<dyn AdminRepository>,
    pub quotations: Arc<dyn QuotationRepository>,
    pub bills: Arc<dyn BillRepository>,
    pub quote_requests: Arc<dyn QuoteRequestRepository>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            admins: Arc::new(MySqlAdminRepository::new(pool.clone())),
            quotations: Arc::new(MySqlQuotationRepository::new(pool.clone())),
            bills: Arc::new(MySqlBillRepository::new(pool.clone())),
            quote_requests: Arc::new(MySqlQuoteRequestRepository::new(pool)),
        }
    }
}

/// Services shared by all workers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub quotations: Arc<QuotationService>,
    pub bills: Arc<BillService>,
    pub submissions: Arc<SubmissionService>,
    pub dashboard: Arc<DashboardService>,
    pub tokens: TokenService,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        mailer: Arc<dyn Mailer>,
        tokens: TokenService,
        rate_limit_per_minute: u32,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.admins.clone(), tokens.clone())),
            quotations: Arc::new(QuotationService::new(repos.quotations.clone())),
            bills: Arc::new(BillService::new(
                repos.bills.clone(),
                repos.quotations.clone(),
            )),
            submissions: Arc::new(SubmissionService::new(repos.quote_requests.clone(), mailer)),
            dashboard: Arc::new(DashboardService::new(repos.bills, repos.quotations)),
            tokens,
            rate_limiter: RateLimiter::new(rate_limit_per_minute),
        }
    }
}

/// Register shared data, extractor error handlers and every route
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.auth.clone()))
        .app_data(web::Data::new(state.quotations.clone()))
        .app_data(web::Data::new(state.bills.clone()))
        .app_data(web::Data::new(state.submissions.clone()))
        .app_data(web::Data::new(state.dashboard.clone()))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(health::configure)
        .service(web::scope("/api/auth").configure(auth::controllers::configure))
        .service(
            web::scope("/api/submissions")
                .wrap(state.rate_limiter.clone())
                .configure(submissions::controllers::configure),
        )
        .service(
            web::scope("/api/quotations")
                .wrap(BearerAuth::new(state.tokens.clone()))
                .configure(quotations::controllers::configure),
        )
        .service(
            web::scope("/api/bills")
                .wrap(BearerAuth::new(state.tokens.clone()))
                .configure(bills::controllers::configure),
        )
        .service(
            web::scope("/api/dashboard")
                .wrap(BearerAuth::new(state.tokens.clone()))
                .configure(dashboard::controllers::configure),
        );
}
