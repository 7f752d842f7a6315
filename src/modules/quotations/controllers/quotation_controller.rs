use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::AdminId;
use crate::modules::quotations::models::{CreateQuotationRequest, UpdateQuotationRequest};
use crate::modules::quotations::services::QuotationService;

/// Query parameters for listing quotations
#[derive(Debug, Default, Deserialize)]
pub struct ListQuotationsQuery {
    pub search: Option<String>,
    /// `pending`, `accepted`, `rejected`, `converted` or `all`
    pub status: Option<String>,
}

/// Create a new quotation
/// POST /api/quotations
pub async fn create_quotation(
    service: web::Data<Arc<QuotationService>>,
    admin: AdminId,
    request: web::Json<CreateQuotationRequest>,
) -> Result<HttpResponse, AppError> {
    tracing::debug!(admin_id = %admin.0, "Creating quotation");
    let quotation = service.create_quotation(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(quotation))
}

/// GET /api/quotations
pub async fn list_quotations(
    service: web::Data<Arc<QuotationService>>,
    _admin: AdminId,
    query: web::Query<ListQuotationsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let quotations = service.list_quotations(query.search, query.status).await?;

    Ok(HttpResponse::Ok().json(quotations))
}

/// GET /api/quotations/{id}
pub async fn get_quotation(
    service: web::Data<Arc<QuotationService>>,
    _admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quotation = service.get_quotation(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(quotation))
}

/// Update a quotation; totals are recomputed
/// PUT /api/quotations/{id}
pub async fn update_quotation(
    service: web::Data<Arc<QuotationService>>,
    admin: AdminId,
    path: web::Path<String>,
    request: web::Json<UpdateQuotationRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, quotation_id = %id, "Updating quotation");
    let quotation = service.update_quotation(&id, request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(quotation))
}

/// DELETE /api/quotations/{id}
pub async fn delete_quotation(
    service: web::Data<Arc<QuotationService>>,
    admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, quotation_id = %id, "Deleting quotation");
    service.delete_quotation(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Bill payload prefilled from a quotation, ready to be edited and posted
/// GET /api/quotations/{id}/bill-draft
pub async fn bill_draft(
    service: web::Data<Arc<QuotationService>>,
    _admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let draft = service.draft_bill(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(draft))
}

/// Register quotation routes on a scope mounted at /api/quotations
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_quotation))
        .route("", web::get().to(list_quotations))
        .route("/{id}", web::get().to(get_quotation))
        .route("/{id}", web::put().to(update_quotation))
        .route("/{id}", web::delete().to(delete_quotation))
        .route("/{id}/bill-draft", web::get().to(bill_draft));
}
