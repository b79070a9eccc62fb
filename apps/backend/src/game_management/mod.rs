//! Game management module
//!
//! HTTP handlers for the action validator and the bot protocol the game
//! server drives us through.

pub mod inspect;
pub mod rules;

use actix_web::{get, post, web, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::config::Settings;
use crate::dto::decision_request::{CardNameAndHand, Hand, MoneyCardsInHand, PossibleCards};
use crate::dto::decision_response::DecisionResponse;
use crate::dto::game_snapshot::GameSnapshot;
use crate::dto::play_request::PlayRequest;
use crate::error::ApiError;
use crate::game_id::{GameId, RequireGameId};
use crate::game_management::inspect::{log_decision, log_game_compact, log_turn_state};
use crate::game_management::rules::validate_action;
use crate::strategy::helpers::{best_from, cheapest_money, worst_in_hand};
use crate::strategy::{decide_play, TurnRegistry};

const OK: &str = "OK";

fn decision<T: serde::Serialize>(game_id: GameId, decision: T) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .json(DecisionResponse::new(game_id.into_inner(), decision))
}

/// Validate a player's announced action. Invalid actions are still a 200.
#[post("/play")]
pub async fn submit_action(play_data: web::Json<PlayRequest>) -> ActixResult<HttpResponse> {
    let PlayRequest { player_id, action } = play_data.into_inner();
    let response = validate_action(&player_id, &action);
    info!(player_id = %player_id, valid = response.valid, "action validated");

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .json(response))
}

#[get("/name")]
pub async fn name(settings: web::Data<Settings>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .json(&settings.bot_name))
}

#[get("/start_game", wrap = "RequireGameId::new()")]
pub async fn start_game(
    game_id: GameId,
    registry: web::Data<TurnRegistry>,
) -> Result<HttpResponse, ApiError> {
    registry.start_game(game_id.as_str()).await;
    info!(active_games = registry.active_games().await, "game started");
    log_decision(OK, None);
    Ok(decision(game_id, OK))
}

#[get("/start_turn", wrap = "RequireGameId::new()")]
pub async fn start_turn(
    game_id: GameId,
    registry: web::Data<TurnRegistry>,
) -> Result<HttpResponse, ApiError> {
    registry
        .with_state(game_id.as_str(), |state| {
            state.start_turn();
            log_turn_state(state);
        })
        .await;
    log_decision(OK, None);
    Ok(decision(game_id, OK))
}

/// Bot-protocol play: one action or buy per call until we end the turn.
#[post("/play", wrap = "RequireGameId::new()")]
pub async fn play(
    game_id: GameId,
    game: web::Json<GameSnapshot>,
    registry: web::Data<TurnRegistry>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, ApiError> {
    log_game_compact(&game);

    let choice = registry
        .with_state(game_id.as_str(), |state| {
            log_turn_state(state);
            decide_play(&game, state, &settings.bot_name, settings.strategy)
        })
        .await
        .to_string();

    log_decision(&choice, Some(settings.strategy.key()));
    Ok(decision(game_id, choice))
}

#[get("/end_game", wrap = "RequireGameId::new()")]
pub async fn end_game(
    game_id: GameId,
    registry: web::Data<TurnRegistry>,
) -> Result<HttpResponse, ApiError> {
    if let Some(state) = registry.end_game(game_id.as_str()).await {
        let elapsed = chrono::Utc::now() - state.started_at;
        info!(
            turns = state.turn,
            bought = %serde_json::json!(state.counts),
            elapsed_secs = elapsed.num_seconds(),
            "game over"
        );
    }
    log_decision(OK, None);
    Ok(decision(game_id, OK))
}

#[post("/confirm_discard_card_from_hand", wrap = "RequireGameId::new()")]
pub async fn confirm_discard_card_from_hand(
    game_id: GameId,
    input: web::Json<CardNameAndHand>,
) -> Result<HttpResponse, ApiError> {
    log_decision("CONFIRM_DISCARD", Some(&input.card_name));
    Ok(decision(game_id, true))
}

#[post("/discard_card_from_hand", wrap = "RequireGameId::new()")]
pub async fn discard_card_from_hand(
    game_id: GameId,
    input: web::Json<Hand>,
) -> Result<HttpResponse, ApiError> {
    let pick = worst_in_hand(&input.hand).ok_or(ApiError::NothingToChoose)?;
    log_decision("DISCARD_FROM_HAND", Some(pick));
    Ok(decision(game_id, pick))
}

#[post("/confirm_trash_card_from_hand", wrap = "RequireGameId::new()")]
pub async fn confirm_trash_card_from_hand(
    game_id: GameId,
    input: web::Json<CardNameAndHand>,
) -> Result<HttpResponse, ApiError> {
    log_decision("CONFIRM_TRASH", Some(&input.card_name));
    Ok(decision(game_id, true))
}

#[post("/trash_card_from_hand", wrap = "RequireGameId::new()")]
pub async fn trash_card_from_hand(
    game_id: GameId,
    input: web::Json<Hand>,
) -> Result<HttpResponse, ApiError> {
    let pick = worst_in_hand(&input.hand).ok_or(ApiError::NothingToChoose)?;
    log_decision("TRASH_FROM_HAND", Some(pick));
    Ok(decision(game_id, pick))
}

#[post("/confirm_discard_deck", wrap = "RequireGameId::new()")]
pub async fn confirm_discard_deck(game_id: GameId) -> Result<HttpResponse, ApiError> {
    log_decision("CONFIRM_DISCARD_DECK", None);
    Ok(decision(game_id, true))
}

#[post("/choose_card_to_receive_in_discard", wrap = "RequireGameId::new()")]
pub async fn choose_card_to_receive_in_discard(
    game_id: GameId,
    input: web::Json<PossibleCards>,
) -> Result<HttpResponse, ApiError> {
    let pick = best_from(&input.possible_cards).ok_or(ApiError::NothingToChoose)?;
    log_decision("RECEIVE_IN_DISCARD", Some(pick));
    Ok(decision(game_id, pick))
}

#[post("/choose_card_to_receive_in_deck", wrap = "RequireGameId::new()")]
pub async fn choose_card_to_receive_in_deck(
    game_id: GameId,
    input: web::Json<PossibleCards>,
) -> Result<HttpResponse, ApiError> {
    let pick = best_from(&input.possible_cards).ok_or(ApiError::NothingToChoose)?;
    log_decision("RECEIVE_IN_DECK", Some(pick));
    Ok(decision(game_id, pick))
}

#[post("/skip_card_reception_in_hand", wrap = "RequireGameId::new()")]
pub async fn skip_card_reception_in_hand(
    game_id: GameId,
    input: web::Json<CardNameAndHand>,
) -> Result<HttpResponse, ApiError> {
    log_decision("SKIP_RECEPTION_IN_HAND", Some(&input.card_name));
    Ok(decision(game_id, true))
}

#[post("/trash_money_card_for_better_money_card", wrap = "RequireGameId::new()")]
pub async fn trash_money_card_for_better_money_card(
    game_id: GameId,
    input: web::Json<MoneyCardsInHand>,
) -> Result<HttpResponse, ApiError> {
    let pick = cheapest_money(&input.money_in_hand).ok_or(ApiError::NothingToChoose)?;
    log_decision("TRASH_MONEY_FOR_BETTER", Some(pick));
    Ok(decision(game_id, pick))
}

/// Bot-protocol endpoints shared by the root and `/game` mounts. Each one is
/// wrapped in [`RequireGameId`] on its own so unknown paths still 404.
/// `/play` is registered separately because its meaning differs between
/// the two mounts.
pub fn configure_decisions(cfg: &mut web::ServiceConfig) {
    cfg.service(start_game)
        .service(start_turn)
        .service(end_game)
        .service(confirm_discard_card_from_hand)
        .service(discard_card_from_hand)
        .service(confirm_trash_card_from_hand)
        .service(trash_card_from_hand)
        .service(confirm_discard_deck)
        .service(choose_card_to_receive_in_discard)
        .service(choose_card_to_receive_in_deck)
        .service(skip_card_reception_in_hand)
        .service(trash_money_card_for_better_money_card);
}
