use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::ApiResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::league::{self, JoinOutcome};
use crate::services::standings;
use crate::types::league::{
    CreateLeagueRequest, CreateLeagueResponse, JoinLeagueRequest, SearchLeaguesQuery,
    UpdateLeagueSettingsRequest, UserLeaguesQuery,
};
use crate::types::response::MessageResponse;

pub async fn create_league(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    req: web::Json<CreateLeagueRequest>,
) -> ApiResult<HttpResponse> {
    let league_id = league::create_league(db.get_ref(), &user, req.into_inner()).await?;

    Ok(HttpResponse::Created().json(CreateLeagueResponse {
        message: "League created successfully".to_string(),
        league_id,
    }))
}

pub async fn update_league_settings(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    req: web::Json<UpdateLeagueSettingsRequest>,
) -> ApiResult<HttpResponse> {
    league::update_settings(db.get_ref(), &user, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("League settings updated successfully.")))
}

pub async fn join_league(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    req: web::Json<JoinLeagueRequest>,
) -> ApiResult<HttpResponse> {
    let message = match league::join_league(db.get_ref(), &user, req.into_inner()).await? {
        JoinOutcome::Joined => "Successfully joined league",
        JoinOutcome::AlreadyMember => "Already a member of this league",
    };
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub async fn get_league(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let league = league::get_league(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(league))
}

pub async fn search_leagues(
    db: web::Data<DatabaseConnection>,
    query: web::Query<SearchLeaguesQuery>,
) -> ApiResult<HttpResponse> {
    let leagues = league::search_leagues(db.get_ref(), query.name.as_deref()).await?;
    Ok(HttpResponse::Ok().json(leagues))
}

pub async fn get_user_leagues(
    db: web::Data<DatabaseConnection>,
    query: web::Query<UserLeaguesQuery>,
) -> ApiResult<HttpResponse> {
    let leagues = league::user_leagues(db.get_ref(), query.username.as_deref()).await?;
    Ok(HttpResponse::Ok().json(leagues))
}

pub async fn get_league_stats(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let rows = standings::compute_league_standings(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(rows))
}
