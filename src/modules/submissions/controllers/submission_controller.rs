use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::submissions::models::{ContactSubmission, QuoteSubmission};
use crate::modules::submissions::services::SubmissionService;

/// Website contact form
/// POST /api/submissions/contact
pub async fn submit_contact(
    service: web::Data<Arc<SubmissionService>>,
    request: web::Json<ContactSubmission>,
) -> Result<HttpResponse, AppError> {
    let receipt = service.submit_contact(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(receipt))
}

/// Website quote request form
/// POST /api/submissions/quote
pub async fn submit_quote(
    service: web::Data<Arc<SubmissionService>>,
    request: web::Json<QuoteSubmission>,
) -> Result<HttpResponse, AppError> {
    let receipt = service.submit_quote(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(receipt))
}

/// Register submission routes on a scope mounted at /api/submissions
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", web::post().to(submit_contact))
        .route("/quote", web::post().to(submit_quote));
}
