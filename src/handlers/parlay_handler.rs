use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::submission::ParlaySubmission;
use crate::services::{parlay_store, settlement, submission};
use crate::types::parlay::{
    ParlayResponse, SettleParlayRequest, SubmissionStatus, SubmitParlayRequest,
};
use crate::types::response::ParlayAck;

pub async fn submit_parlay(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    req: web::Json<SubmitParlayRequest>,
) -> ApiResult<HttpResponse> {
    let parlay = ParlaySubmission::try_from(req.into_inner())?;
    let parlay_id = submission::submit_parlay(db.get_ref(), &user, parlay).await?;

    Ok(HttpResponse::Ok().json(ParlayAck {
        message: "Parlay submitted!".to_string(),
        parlay_id,
    }))
}

/// Everyone's parlays for the week, visible only once the caller has submitted.
pub async fn get_week_parlays(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<HttpResponse> {
    let (league_id, week) = path.into_inner();

    if parlay_store::find_parlay(db.get_ref(), user.id, league_id, week)
        .await?
        .is_none()
    {
        return Err(ApiError::forbidden(
            "Submit your parlay to view others' picks.",
        ));
    }

    let parlays: Vec<ParlayResponse> =
        parlay_store::find_parlays_by_league_and_week(db.get_ref(), league_id, week)
            .await?
            .into_iter()
            .map(ParlayResponse::from)
            .collect();

    Ok(HttpResponse::Ok().json(parlays))
}

pub async fn get_my_submission(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<HttpResponse> {
    let (league_id, week) = path.into_inner();
    let submitted = parlay_store::find_parlay(db.get_ref(), user.id, league_id, week)
        .await?
        .is_some();

    Ok(HttpResponse::Ok().json(SubmissionStatus { submitted }))
}

pub async fn settle_parlay(
    db: web::Data<DatabaseConnection>,
    user: web::ReqData<AuthenticatedUser>,
    req: web::Json<SettleParlayRequest>,
) -> ApiResult<HttpResponse> {
    let parlay_id = settlement::settle_parlay(db.get_ref(), &user, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ParlayAck {
        message: "Parlay settled.".to_string(),
        parlay_id,
    }))
}
