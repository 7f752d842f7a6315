use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::AdminId;
use crate::modules::bills::models::{CreateBillRequest, RecordPaymentRequest, UpdateBillRequest};
use crate::modules::bills::services::BillService;

/// Query parameters for listing bills
#[derive(Debug, Default, Deserialize)]
pub struct ListBillsQuery {
    pub search: Option<String>,
    /// `pending`, `advanced`, `paid` or `all`
    pub status: Option<String>,
}

/// Create a new bill
/// POST /api/bills
pub async fn create_bill(
    service: web::Data<Arc<BillService>>,
    admin: AdminId,
    request: web::Json<CreateBillRequest>,
) -> Result<HttpResponse, AppError> {
    tracing::debug!(admin_id = %admin.0, "Creating bill");
    let bill = service.create_bill(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(bill))
}

/// GET /api/bills
pub async fn list_bills(
    service: web::Data<Arc<BillService>>,
    _admin: AdminId,
    query: web::Query<ListBillsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let bills = service.list_bills(query.search, query.status).await?;

    Ok(HttpResponse::Ok().json(bills))
}

/// GET /api/bills/{id}
pub async fn get_bill(
    service: web::Data<Arc<BillService>>,
    _admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bill = service.get_bill(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(bill))
}

/// Update a bill; totals and status are recomputed
/// PUT /api/bills/{id}
pub async fn update_bill(
    service: web::Data<Arc<BillService>>,
    admin: AdminId,
    path: web::Path<String>,
    request: web::Json<UpdateBillRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, bill_id = %id, "Updating bill");
    let bill = service.update_bill(&id, request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(bill))
}

/// DELETE /api/bills/{id}
pub async fn delete_bill(
    service: web::Data<Arc<BillService>>,
    admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, bill_id = %id, "Deleting bill");
    service.delete_bill(&id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/bills/{id}/payments
pub async fn record_payment(
    service: web::Data<Arc<BillService>>,
    admin: AdminId,
    path: web::Path<String>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, bill_id = %id, "Recording payment");
    let bill = service.record_payment(&id, request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(bill))
}

/// POST /api/bills/{id}/mark-paid
pub async fn mark_paid(
    service: web::Data<Arc<BillService>>,
    admin: AdminId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    tracing::debug!(admin_id = %admin.0, bill_id = %id, "Marking bill paid");
    let bill = service.mark_paid(&id).await?;

    Ok(HttpResponse::Ok().json(bill))
}

/// Register bill routes on a scope mounted at /api/bills
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_bill))
        .route("", web::get().to(list_bills))
        .route("/{id}", web::get().to(get_bill))
        .route("/{id}", web::put().to(update_bill))
        .route("/{id}", web::delete().to(delete_bill))
        .route("/{id}/payments", web::post().to(record_payment))
        .route("/{id}/mark-paid", web::post().to(mark_paid));
}
