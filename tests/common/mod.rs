#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, Error,
};
use migration::{Migrator, MigratorTrait};
use parlay_league::constants::config::AppConfig;
use parlay_league::state::AppState;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::new("sqlite::memory:", TEST_SECRET);
    config.bcrypt_cost = 4;
    config
}

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn test_state() -> AppState {
    AppState::new(setup_db().await, test_config())
}

/// Status of a response, including errors raised by middleware before a
/// handler ran.
pub async fn status_of<S, B>(app: &S, req: Request) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

/// Status and JSON body of a handler response.
pub async fn call_json<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

pub struct TestUser {
    pub id: i32,
    pub username: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

pub async fn register_and_login<S, B>(app: &S, username: &str) -> TestUser
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let credentials = json!({ "username": username, "password": "hunter22" });

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&credentials)
        .to_request();
    let (status, _) = call_json(app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&credentials)
        .to_request();
    let (status, body) = call_json(app, req).await;
    assert_eq!(status, StatusCode::OK);

    TestUser {
        id: body["userId"].as_i64().expect("userId") as i32,
        username: username.to_string(),
        token: body["token"].as_str().expect("token").to_string(),
    }
}

pub async fn create_league<S, B>(app: &S, owner: &TestUser, name: &str, passkey: &str) -> i32
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/create-league")
        .insert_header(owner.bearer())
        .set_json(json!({ "leagueName": name, "passkey": passkey }))
        .to_request();
    let (status, body) = call_json(app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    body["leagueId"].as_i64().expect("leagueId") as i32
}

pub async fn join_league<S, B>(app: &S, user: &TestUser, league_id: i32, passkey: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/leagues/join")
        .insert_header(user.bearer())
        .set_json(json!({ "leagueId": league_id, "passkey": passkey }))
        .to_request();
    call_json(app, req).await.0
}

pub fn three_leg_picks() -> Value {
    json!([
        { "team": "Bills", "type": "spread", "side": "home", "line": -3.5, "odds": -110, "matchup": "Jets @ Bills" },
        { "team": "Chiefs", "type": "moneyline", "odds": "-150" },
        { "team": "Over", "type": "total", "line": "47.5", "odds": 100 }
    ])
}

pub async fn submit_parlay<S, B>(
    app: &S,
    user: &TestUser,
    league_id: i32,
    week: i32,
    odds: f64,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/parlay/submit")
        .insert_header(user.bearer())
        .set_json(json!({
            "leagueId": league_id,
            "week": week,
            "picks": three_leg_picks(),
            "odds": odds,
        }))
        .to_request();
    call_json(app, req).await
}

pub async fn settle<S, B>(app: &S, creator: &TestUser, payload: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/parlay/settle")
        .insert_header(creator.bearer())
        .set_json(payload)
        .to_request();
    call_json(app, req).await
}
