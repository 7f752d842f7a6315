use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AdminId;
use crate::modules::dashboard::services::DashboardService;

/// GET /api/dashboard/summary
pub async fn summary(
    service: web::Data<Arc<DashboardService>>,
    _admin: AdminId,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary().await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Register dashboard routes on a scope mounted at /api/dashboard
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/summary", web::get().to(summary));
}
