use crate::types::response::ApiResponse;
use actix_web::{HttpResponse, Result};

pub async fn health_check() -> Result<HttpResponse> {
    let response = ApiResponse {
        message: "Parlay League API is running".to_string(),
        status: "healthy".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub async fn index() -> Result<HttpResponse> {
    let response = ApiResponse {
        message: "Welcome to Parlay League API".to_string(),
        status: "success".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
