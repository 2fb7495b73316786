mod common;

use actix_web::{http::StatusCode, test, App};
use serde_json::json;

use common::*;

#[actix_web::test]
async fn register_and_login_errors() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    register_and_login(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": "alice", "password": "other" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": "carol" }))
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "nobody", "password": "x" }))
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "wrong" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[actix_web::test]
async fn malformed_json_body_is_bad_request() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_web::test]
async fn league_names_are_unique_ignoring_case() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;

    create_league(&app, &alice, "Sunday Club", "pk").await;

    let req = test::TestRequest::post()
        .uri("/create-league")
        .insert_header(bob.bearer())
        .set_json(json!({ "leagueName": "sunday club", "passkey": "other" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A league with this name already exists.");

    let req = test::TestRequest::post()
        .uri("/create-league")
        .insert_header(bob.bearer())
        .set_json(json!({ "leagueName": "Monday Club" }))
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/create-league")
        .set_json(json!({ "leagueName": "Tuesday Club", "passkey": "pk" }))
        .to_request();
    assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn new_league_has_classic_defaults() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    let league_id = create_league(&app, &alice, "Defaults", "secret-pk").await;

    let req = test::TestRequest::get()
        .uri(&format!("/league/{}", league_id))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Defaults");
    assert_eq!(body["creator"], json!({ "id": alice.id, "username": "alice" }));
    assert_eq!(body["members"], json!([]));
    assert!(body.get("passkey").is_none());

    let settings = &body["settings"];
    assert_eq!(settings["leagueType"], "classic");
    assert_eq!(settings["startingBucs"].as_f64(), Some(5000.0));
    assert_eq!(settings["minTotalOdds"].as_f64(), Some(500.0));
    assert_eq!(settings["minLegOdds"].as_f64(), Some(-150.0));
    assert_eq!(settings["numLegs"], 3);
    assert_eq!(settings["submissionDeadline"], "Sunday 12:00 PM");
    assert_eq!(settings["pointsPerWin"], json!(null));

    let req = test::TestRequest::get().uri("/league/4242").to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn join_checks_passkey_and_is_idempotent() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;
    let league_id = create_league(&app, &alice, "Join Club", "open-sesame").await;

    assert_eq!(join_league(&app, &bob, league_id, "wrong").await, StatusCode::FORBIDDEN);
    assert_eq!(join_league(&app, &bob, 9999, "open-sesame").await, StatusCode::NOT_FOUND);
    assert_eq!(join_league(&app, &bob, league_id, "open-sesame").await, StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/leagues/join")
        .insert_header(bob.bearer())
        .set_json(json!({ "leagueId": league_id, "passkey": "open-sesame" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Already a member of this league");

    let req = test::TestRequest::get()
        .uri(&format!("/league/{}", league_id))
        .to_request();
    let (_, body) = call_json(&app, req).await;
    assert_eq!(body["members"], json!([bob.id]));

    let req = test::TestRequest::get()
        .uri("/api/user-leagues?username=bob")
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Join Club");

    let req = test::TestRequest::get()
        .uri("/api/user-leagues?username=ghost")
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::NOT_FOUND);

    // Joining records the league as bob's default affiliation.
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "bob", "password": "hunter22" }))
        .to_request();
    let (_, body) = call_json(&app, req).await;
    assert_eq!(body["leagueName"], "Join Club");
    assert_eq!(body["passkey"], "open-sesame");
}

#[actix_web::test]
async fn settings_update_is_creator_only_and_validated() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;
    let league_id = create_league(&app, &alice, "Points Club", "pk").await;

    let points = json!({
        "leagueId": league_id,
        "leagueType": "points",
        "pointsPerWin": 1,
        "bonusWeek": 2,
        "bonusSeason": 5,
        "startingBucs": 1000,
        "minTotalOdds": 400,
        "minLegOdds": -200,
        "numLegs": 4,
        "submissionDeadline": "Sunday 1:00 PM",
    });

    let req = test::TestRequest::post()
        .uri("/api/league-settings")
        .insert_header(bob.bearer())
        .set_json(&points)
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to edit settings for this league.");

    let req = test::TestRequest::post()
        .uri("/api/league-settings")
        .insert_header(alice.bearer())
        .set_json(json!({
            "leagueId": league_id,
            "leagueType": "points",
            "minTotalOdds": 400,
            "minLegOdds": -200,
            "numLegs": 2.5,
            "submissionDeadline": "Sunday",
        }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Points leagues must include pointsPerWin, Points leagues must include bonusWeek, \
         Points leagues must include bonusSeason, Missing or invalid numLegs"
    );

    let req = test::TestRequest::post()
        .uri("/api/league-settings")
        .insert_header(alice.bearer())
        .set_json(json!({ "leagueId": league_id, "leagueType": "points" }))
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields.");

    let req = test::TestRequest::post()
        .uri("/api/league-settings")
        .insert_header(alice.bearer())
        .set_json(&points)
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/league/{}", league_id))
        .to_request();
    let (_, body) = call_json(&app, req).await;
    let settings = &body["settings"];
    assert_eq!(settings["leagueType"], "points");
    assert_eq!(settings["bonusSeason"].as_f64(), Some(5.0));
    assert_eq!(settings["startingBucs"], json!(null));
    assert_eq!(settings["numLegs"], 4);
}

#[actix_web::test]
async fn search_matches_case_insensitive_substrings() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    create_league(&app, &alice, "Sunday Club", "pk").await;
    create_league(&app, &alice, "Big Sunday", "pk").await;
    create_league(&app, &alice, "Thursday Night", "pk").await;

    let req = test::TestRequest::get()
        .uri("/api/leagues/search?name=SUNDAY")
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Big Sunday", "Sunday Club"]);

    let req = test::TestRequest::get().uri("/api/leagues/search").to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/leagues/search?name=hockey")
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_treats_wildcards_literally() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let alice = register_and_login(&app, "alice").await;
    create_league(&app, &alice, "Sunday Club", "pk").await;
    create_league(&app, &alice, "100% Locks", "pk").await;

    let req = test::TestRequest::get()
        .uri("/api/leagues/search?name=%25")
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "100% Locks");

    let req = test::TestRequest::get()
        .uri("/api/leagues/search?name=s_nday")
        .to_request();
    assert_eq!(call_json(&app, req).await.0, StatusCode::NOT_FOUND);
}
