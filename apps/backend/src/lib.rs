pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod error;
pub mod game_id;
pub mod game_management;
pub mod strategy;
pub mod test_support;

pub use bootstrap::{init_tracing, load_dotenv};

use actix_web::web;

use config::Settings;
use dto::meta::{ApiDocs, HealthResponse, RouteDoc, ServiceInfo};
use error::json_error_handler;
use game_management::{configure_decisions, name, play, submit_action};

/// Method, path, summary and whether `X-Game-Id` is required.
const ROUTES: [(&str, &str, &str, bool); 19] = [
    ("GET", "/", "service info", false),
    ("GET", "/health", "liveness probe", false),
    ("GET", "/docs", "this route catalog", false),
    ("POST", "/game/play", "validate a player action", false),
    ("GET", "/name", "bot name", false),
    ("GET", "/start_game", "reset turn state for a match", true),
    ("GET", "/start_turn", "advance to the next turn", true),
    ("POST", "/play", "next action, buy or END_TURN", true),
    ("GET", "/end_game", "drop turn state for a match", true),
    ("POST", "/confirm_discard_card_from_hand", "always true", true),
    ("POST", "/discard_card_from_hand", "worst card in hand", true),
    ("POST", "/confirm_trash_card_from_hand", "always true", true),
    ("POST", "/trash_card_from_hand", "worst card in hand", true),
    ("POST", "/confirm_discard_deck", "always true", true),
    ("POST", "/choose_card_to_receive_in_discard", "best card offered", true),
    ("POST", "/choose_card_to_receive_in_deck", "best card offered", true),
    ("POST", "/skip_card_reception_in_hand", "always true", true),
    ("POST", "/trash_money_card_for_better_money_card", "cheapest money card", true),
    ("*", "/game/{route}", "bot routes above except /play, also mounted under /game", true),
];

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(service_info)
        .service(health)
        .service(docs)
        .service(name)
        .service(play)
        .configure(configure_decisions)
        .service(
            web::scope("/game")
                .service(submit_action)
                .service(name)
                .configure(configure_decisions),
        );
}

#[actix_web::get("/")]
async fn service_info(settings: web::Data<Settings>) -> impl actix_web::Responder {
    web::Json(ServiceInfo {
        name: settings.service_name.clone(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

#[actix_web::get("/health")]
async fn health() -> impl actix_web::Responder {
    web::Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[actix_web::get("/docs")]
async fn docs(settings: web::Data<Settings>) -> impl actix_web::Responder {
    let routes = ROUTES
        .iter()
        .map(|(method, path, summary, requires_game_id)| RouteDoc {
            method: method.to_string(),
            path: path.to_string(),
            summary: summary.to_string(),
            requires_game_id: *requires_game_id,
        })
        .collect();
    web::Json(ApiDocs {
        name: settings.service_name.clone(),
        routes,
    })
}
