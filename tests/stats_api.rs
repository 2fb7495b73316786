mod common;

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};

use common::*;

fn row<'a>(rows: &'a Value, username: &str) -> &'a Value {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|r| r["username"] == username)
        .unwrap()
}

#[actix_web::test]
async fn empty_league_has_empty_standings() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/league/77/stats").to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn season_standings_over_http() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
    let commish = register_and_login(&app, "commish").await;
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;
    let carol = register_and_login(&app, "carol").await;
    let league_id = create_league(&app, &commish, "Stats League", "pk").await;

    // Week 1: alice 4.0 won, bob 4.5 won, carol 9.0 lost.
    // Week 2: alice 5.0 won (season max), carol 3.0 pending.
    // Week 3: alice 2.0 lost.
    let plan = [
        (&alice, 1, 4.0, "won", 3, 0),
        (&bob, 1, 4.5, "won", 3, 0),
        (&carol, 1, 9.0, "lost", 1, 2),
        (&alice, 2, 5.0, "won", 3, 0),
        (&carol, 2, 3.0, "pending", 0, 0),
        (&alice, 3, 2.0, "lost", 2, 1),
    ];
    for (user, week, odds, result, won, lost) in plan {
        let (status, _) = submit_parlay(&app, user, league_id, week, odds).await;
        assert_eq!(status, StatusCode::OK);
        if result != "pending" {
            let (status, _) = settle(
                &app,
                &commish,
                json!({
                    "leagueId": league_id,
                    "targetUserId": user.id,
                    "week": week,
                    "result": result,
                    "legsWon": won,
                    "legsLost": lost,
                }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/league/{}/stats", league_id))
        .to_request();
    let (status, rows) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let order: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["username"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["alice", "bob", "carol"]);

    assert_eq!(
        row(&rows, "alice"),
        &json!({
            "username": "alice",
            "legsWon": 8,
            "legsLost": 1,
            "parlayWins": 2,
            "parlayLosses": 1,
            "points": 9,
        })
    );
    assert_eq!(row(&rows, "bob")["points"], 3);
    assert_eq!(row(&rows, "carol")["points"], 0);
    assert_eq!(row(&rows, "carol")["parlayLosses"], 1);
    assert_eq!(row(&rows, "carol")["legsLost"], 2);
}
