//! Fixtures shared by unit and integration tests.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::dto::game_snapshot::{CardCounts, GameSnapshot, PlayerSnapshot};
use crate::strategy::state::Counts;
use crate::strategy::TurnState;

static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,deckbot=info"));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_test_writer())
            .init();
    });
}

/// Settings for in-process test apps; never touches the environment.
pub fn test_settings() -> Settings {
    Settings::default()
}

fn to_map(entries: &[(&str, u32)]) -> std::collections::HashMap<String, u32> {
    entries
        .iter()
        .map(|(card, n)| (card.to_string(), *n))
        .collect()
}

pub fn counts(entries: &[(&str, u32)]) -> Counts {
    to_map(entries)
}

pub fn hand(entries: &[(&str, u32)]) -> CardCounts {
    CardCounts {
        quantities: to_map(entries),
    }
}

pub fn player_named(name: &str, score: i32, hand: Option<CardCounts>) -> PlayerSnapshot {
    PlayerSnapshot {
        name: name.to_string(),
        score,
        hand,
    }
}

pub fn game_with_players(players: Vec<PlayerSnapshot>) -> GameSnapshot {
    GameSnapshot {
        players,
        ..GameSnapshot::default()
    }
}

pub fn game_with_stock(stock: &[(&str, u32)]) -> GameSnapshot {
    GameSnapshot {
        stock: hand(stock),
        ..GameSnapshot::default()
    }
}

pub fn with_players(game: GameSnapshot, players: Vec<PlayerSnapshot>) -> GameSnapshot {
    GameSnapshot { players, ..game }
}

/// Turn state as it looks `turn` turns into a match with `bought` in the deck.
pub fn turn_state(turn: u32, bought: &[(&str, u32)]) -> TurnState {
    TurnState {
        turn,
        counts: counts(bought),
        ..TurnState::default()
    }
}
