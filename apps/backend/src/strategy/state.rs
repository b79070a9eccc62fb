//! Per-game turn state
//!
//! The game server drives a match through many short requests. Everything
//! we need to remember between them lives in a [`TurnState`] keyed by game
//! id inside the [`TurnRegistry`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Cards bought so far in a match, by name.
pub type Counts = HashMap<String, u32>;

pub fn count(counts: &Counts, card: &str) -> u32 {
    counts.get(card).copied().unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Action,
    Buy,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnState {
    pub turn: u32,
    pub phase: Phase,
    pub bought: bool,
    pub counts: Counts,
    pub actions_left: u32,
    /// Coins granted by actions played this turn
    pub action_coins: u32,
    /// Buys granted by actions played this turn
    pub extra_buys: u32,
    pub coins_left: u32,
    pub buys_left: u32,
    /// Decided once, on the first play of the match
    pub gardens_plan: Option<bool>,
    pub started_at: DateTime<Utc>,
    /// Last time the game server touched this match
    pub last_seen: DateTime<Utc>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            turn: 0,
            phase: Phase::Action,
            bought: false,
            counts: Counts::new(),
            actions_left: 1,
            action_coins: 0,
            extra_buys: 0,
            coins_left: 0,
            buys_left: 1,
            gardens_plan: None,
            started_at: Utc::now(),
            last_seen: Utc::now(),
        }
    }
}

impl TurnState {
    /// Reset per-turn counters at the start of a new turn.
    pub fn start_turn(&mut self) {
        self.turn += 1;
        self.phase = Phase::Action;
        self.bought = false;
        self.actions_left = 1;
        self.action_coins = 0;
        self.extra_buys = 0;
        self.coins_left = 0;
        self.buys_left = 1;
    }

    pub fn count(&self, card: &str) -> u32 {
        count(&self.counts, card)
    }

    /// Record a purchase: pay for it, use up a base buy and count the card.
    pub fn record_buy(&mut self, card: &str, cost: u32, coins: u32) {
        self.bought = true;
        self.coins_left = coins.saturating_sub(cost);
        // Extra buys from actions are left untouched
        self.buys_left = self.buys_left.saturating_sub(1);
        *self.counts.entry(card.to_string()).or_insert(0) += 1;
    }
}

type Slot = Arc<Mutex<TurnState>>;

/// In-memory turn state for every match in progress.
///
/// The map lock is held only to find or insert a game's slot; decisions run
/// under that game's own lock, so separate matches never wait on each other.
#[derive(Default)]
pub struct TurnRegistry {
    games: RwLock<HashMap<String, Slot>>,
}

impl TurnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, game_id: &str) -> Slot {
        if let Some(slot) = self.games.read().await.get(game_id) {
            return slot.clone();
        }
        self.games
            .write()
            .await
            .entry(game_id.to_string())
            .or_default()
            .clone()
    }

    /// Replace any previous state for the game with a fresh one.
    pub async fn start_game(&self, game_id: &str) {
        self.games
            .write()
            .await
            .insert(game_id.to_string(), Slot::default());
    }

    /// Run `f` against the game's state, creating it on first use.
    pub async fn with_state<R>(&self, game_id: &str, f: impl FnOnce(&mut TurnState) -> R) -> R {
        let slot = self.slot(game_id).await;
        let mut state = slot.lock().await;
        state.last_seen = Utc::now();
        f(&mut state)
    }

    pub async fn snapshot(&self, game_id: &str) -> Option<TurnState> {
        let slot = self.games.read().await.get(game_id).cloned()?;
        let state = slot.lock().await;
        Some(state.clone())
    }

    /// Forget the game, returning its final state.
    pub async fn end_game(&self, game_id: &str) -> Option<TurnState> {
        let slot = self.games.write().await.remove(game_id)?;
        let state = slot.lock().await;
        Some(state.clone())
    }

    pub async fn active_games(&self) -> usize {
        self.games.read().await.len()
    }

    /// Drop games the server has not touched for `ttl`. Games busy with a
    /// request are kept. Returns how many were dropped.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let now = Utc::now();
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|_, slot| match slot.try_lock() {
            Ok(state) => (now - state.last_seen)
                .to_std()
                .map_or(true, |idle| idle < ttl),
            Err(_) => true,
        });
        before - games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_turn_resets_counters_and_advances() {
        let mut state = TurnState {
            phase: Phase::Buy,
            bought: true,
            actions_left: 0,
            action_coins: 3,
            extra_buys: 2,
            coins_left: 4,
            buys_left: 0,
            ..TurnState::default()
        };
        state.start_turn();
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Action);
        assert!(!state.bought);
        assert_eq!(state.actions_left, 1);
        assert_eq!(state.action_coins, 0);
        assert_eq!(state.extra_buys, 0);
        assert_eq!(state.buys_left, 1);
    }

    #[test]
    fn test_record_buy_floors_at_zero() {
        let mut state = TurnState::default();
        state.record_buy("province", 8, 5);
        assert_eq!(state.coins_left, 0);
        assert_eq!(state.buys_left, 0);
        state.record_buy("copper", 0, 0);
        assert_eq!(state.buys_left, 0);
        assert_eq!(state.count("province"), 1);
        assert_eq!(state.count("copper"), 1);
        assert!(state.bought);
    }

    #[tokio::test]
    async fn test_registry_lifecycle() {
        let registry = TurnRegistry::new();
        registry.with_state("g1", |s| s.start_turn()).await;
        assert_eq!(registry.snapshot("g1").await.map(|s| s.turn), Some(1));

        registry.start_game("g1").await;
        assert_eq!(registry.snapshot("g1").await.map(|s| s.turn), Some(0));

        assert!(registry.end_game("g1").await.is_some());
        assert!(registry.snapshot("g1").await.is_none());
        assert_eq!(registry.active_games().await, 0);
    }

    #[tokio::test]
    async fn test_games_do_not_share_state() {
        let registry = TurnRegistry::new();
        registry.start_game("g1").await;
        registry.start_game("g2").await;
        registry
            .with_state("g1", |s| {
                s.start_turn();
                s.phase = Phase::Buy;
                s.record_buy("silver", 3, 3);
            })
            .await;

        let g2 = registry.snapshot("g2").await.unwrap();
        assert_eq!(g2.turn, 0);
        assert_eq!(g2.phase, Phase::Action);
        assert!(g2.counts.is_empty());

        assert!(registry.end_game("g1").await.is_some());
        assert!(registry.snapshot("g2").await.is_some());
        assert_eq!(registry.active_games().await, 1);
    }

    #[tokio::test]
    async fn test_busy_game_does_not_block_others() {
        let registry = TurnRegistry::new();
        let g1 = registry.slot("g1").await;
        let _held = g1.lock().await;

        let turn = tokio::time::timeout(
            Duration::from_secs(1),
            registry.with_state("g2", |s| {
                s.start_turn();
                s.turn
            }),
        )
        .await
        .unwrap();
        assert_eq!(turn, 1);
    }

    #[tokio::test]
    async fn test_sweep_drops_only_idle_games() {
        let registry = TurnRegistry::new();
        registry
            .with_state("stale", |s| s.last_seen = Utc::now() - chrono::Duration::hours(2))
            .await;
        registry.with_state("fresh", |s| s.start_turn()).await;

        assert_eq!(registry.sweep_idle(Duration::from_secs(3600)).await, 1);
        assert!(registry.snapshot("stale").await.is_none());
        assert!(registry.snapshot("fresh").await.is_some());
    }

    #[tokio::test]
    async fn test_sweep_keeps_busy_games() {
        let registry = TurnRegistry::new();
        registry
            .with_state("g1", |s| s.last_seen = Utc::now() - chrono::Duration::hours(2))
            .await;
        let g1 = registry.slot("g1").await;
        let _held = g1.lock().await;

        assert_eq!(registry.sweep_idle(Duration::from_secs(60)).await, 0);
        assert_eq!(registry.active_games().await, 1);
    }
}
