use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::auth::models::LoginRequest;
use crate::modules::auth::services::AuthService;

/// Exchange admin credentials for a bearer token
/// POST /api/auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Register auth routes on a scope mounted at /api/auth
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login));
}
