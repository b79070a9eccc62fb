use actix_web::{test, web, App};
use serde_json::{json, Value};

use deckbot::configure_routes;
use deckbot::test_support::common::{init_tracing_for_tests, test_settings};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_settings()))
                .app_data(web::Data::new(deckbot::strategy::TurnRegistry::new()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn play(player_id: &str, action: &str) -> anyhow::Result<Value> {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/game/play")
        .set_json(json!({ "player_id": player_id, "action": action }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    Ok(test::read_body_json(resp).await)
}

#[actix_web::test]
async fn health_and_service_info() -> anyhow::Result<()> {
    init_tracing_for_tests();
    let app = app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "ok" }));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "name": "deckbot", "docs": "/docs", "health": "/health" })
    );
    Ok(())
}

#[actix_web::test]
async fn accepted_actions_echo_the_label() -> anyhow::Result<()> {
    init_tracing_for_tests();
    assert_eq!(
        play("p1", "play").await?,
        json!({ "valid": true, "message": "Action play accepted" })
    );
    assert_eq!(
        play("", "end").await?,
        json!({ "valid": true, "message": "Action end accepted" })
    );
    Ok(())
}

#[actix_web::test]
async fn unknown_actions_are_rejected_with_200() -> anyhow::Result<()> {
    init_tracing_for_tests();
    for action in ["explode", "Play", "", " buy"] {
        assert_eq!(
            play("p2", action).await?,
            json!({ "valid": false, "message": "Invalid action" }),
            "action {action:?}"
        );
    }
    Ok(())
}

#[actix_web::test]
async fn malformed_body_is_422() -> anyhow::Result<()> {
    init_tracing_for_tests();
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/game/play")
        .set_json(json!({ "player_id": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    Ok(())
}
