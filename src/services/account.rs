use bcrypt::{hash, verify};
use chrono::Utc;
use entity::users;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::constants::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::utils::jwt::create_jwt_token;

pub async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> ApiResult<Option<users::Model>> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(user)
}

pub async fn register<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    req: RegisterRequest,
) -> ApiResult<users::Model> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::invalid("Username and password are required"));
    }

    if find_user_by_username(db, username).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash(&req.password, config.bcrypt_cost).map_err(|e| {
        ApiError::Internal(format!("Password hashing error: {}", e))
    })?;

    let new_user = users::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        league_name: Set(None),
        passkey: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let user = new_user
        .insert(db)
        .await
        .map_err(|e| ApiError::from_insert(e, "User already exists"))?;

    log::info!("Registered user {} ({})", user.id, user.username);
    Ok(user)
}

pub async fn login<C: ConnectionTrait>(
    db: &C,
    config: &AppConfig,
    req: LoginRequest,
) -> ApiResult<LoginResponse> {
    let user = find_user_by_username(db, req.username.trim())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let is_valid = verify(&req.password, &user.password_hash).map_err(|e| {
        ApiError::Internal(format!("Password verification error: {}", e))
    })?;
    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = create_jwt_token(user.id, config)
        .map_err(|e| ApiError::Internal(format!("JWT token creation error: {}", e)))?;

    Ok(LoginResponse {
        token,
        username: user.username,
        user_id: user.id,
        league_name: user.league_name,
        passkey: user.passkey,
    })
}
