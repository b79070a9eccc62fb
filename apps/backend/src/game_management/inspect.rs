//! Structured logging of what the game server sent and what we decided.

use serde_json::{json, Map, Value};
use tracing::info;

use crate::dto::game_snapshot::{CardCounts, GameSnapshot};
use crate::strategy::cards::STOCK_PREVIEW_ORDER;
use crate::strategy::TurnState;

/// Stock counts with the piles we care about first, then the rest sorted.
pub fn stock_preview(stock: &CardCounts) -> Map<String, Value> {
    let mut preview = Map::new();
    for card in STOCK_PREVIEW_ORDER {
        if let Some(n) = stock.quantities.get(card) {
            preview.insert(card.to_string(), json!(n));
        }
    }
    let mut rest: Vec<_> = stock
        .quantities
        .iter()
        .filter(|(card, _)| !STOCK_PREVIEW_ORDER.contains(&card.as_str()))
        .collect();
    rest.sort();
    for (card, n) in rest {
        preview.insert(card.clone(), json!(n));
    }
    preview
}

/// Concise snapshot of the game for quick scanning.
pub fn log_game_compact(game: &GameSnapshot) {
    let players: Vec<Value> = game
        .players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            json!({
                "idx": idx,
                "name": p.name,
                "score": p.score,
                "hand": p.hand.as_ref().map(|h| &h.quantities),
            })
        })
        .collect();
    // Bound outside the macro, where `Value` would name the tracing trait
    let players = Value::Array(players);
    let stock = Value::Object(stock_preview(&game.stock));
    info!(
        finished = game.finished,
        players = %players,
        stock = %stock,
        "game snapshot"
    );
}

pub fn log_turn_state(state: &TurnState) {
    info!(
        turn = state.turn,
        coins_left = state.coins_left,
        buys_left = state.buys_left,
        bought = state.bought,
        counts = %json!(state.counts),
        "turn state"
    );
}

pub fn log_decision(decision: &str, detail: Option<&str>) {
    match detail {
        Some(detail) => info!(decision, detail, "decision"),
        None => info!(decision, "decision"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::common::{
        game_with_stock, hand, init_tracing_for_tests, player_named, with_players,
    };

    #[test]
    fn test_stock_preview_is_stable() {
        let stock = CardCounts::from([("witch", 10), ("gold", 30), ("copper", 46), ("bandit", 10)]);
        let keys: Vec<_> = stock_preview(&stock).keys().cloned().collect();
        assert_eq!(keys, vec!["copper", "gold", "bandit", "witch"]);
    }

    #[test]
    fn test_logging_a_snapshot_does_not_panic() {
        init_tracing_for_tests();
        let game = with_players(
            game_with_stock(&[("province", 8), ("gold", 30)]),
            vec![
                player_named("Deckbot", 3, Some(hand(&[("copper", 5)]))),
                player_named("rival", 3, None),
            ],
        );
        log_game_compact(&game);
        log_turn_state(&TurnState::default());
        log_decision("BUY gold", Some("baseline"));
        log_decision("END_TURN", None);
    }
}
