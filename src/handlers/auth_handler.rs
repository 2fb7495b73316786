use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::constants::config::AppConfig;
use crate::error::ApiResult;
use crate::services::account;
use crate::types::auth::{LoginRequest, RegisterRequest};
use crate::types::response::MessageResponse;

pub async fn register(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    req: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    account::register(db.get_ref(), config.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully")))
}

pub async fn login(
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    req: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let response = account::login(db.get_ref(), config.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
