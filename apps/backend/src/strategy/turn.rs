//! Turn driver
//!
//! Runs one `/play` call: action phase first, then buys until the turn
//! runs out of buys or coins.

use tracing::debug;

use super::actions::choose_action;
use super::buys::should_pivot_to_gardens;
use super::cards::{self, BUY_GOLD_COINS, BUY_PROVINCE_COINS, BUY_SILVER_COINS};
use super::helpers::{find_me, treasure_coins};
use super::pipeline::BuyCtx;
use super::state::{Phase, TurnState};
use super::strategies::StrategyKind;
use super::Decision;
use crate::dto::game_snapshot::GameSnapshot;

/// Decide what to do on this call and update the turn state accordingly.
pub fn decide_play(
    game: &GameSnapshot,
    state: &mut TurnState,
    bot_name: &str,
    strategy: StrategyKind,
) -> Decision {
    let me_idx = find_me(game, bot_name);

    if state.gardens_plan.is_none() {
        state.gardens_plan = Some(should_pivot_to_gardens(game, me_idx));
    }

    if state.phase == Phase::Action {
        if let Some(decision) = choose_action(game, me_idx, state) {
            debug!(me_idx, actions_left = state.actions_left, %decision, "action phase");
            return decision;
        }
        state.phase = Phase::Buy;
    }

    let coins = treasure_coins(game, me_idx).saturating_add(state.action_coins);
    let buys_left = state.buys_left.saturating_add(state.extra_buys);
    state.coins_left = coins;

    let affordable_any = (game.in_stock("province") && coins >= BUY_PROVINCE_COINS)
        || (game.in_stock("gold") && coins >= BUY_GOLD_COINS)
        || coins >= BUY_SILVER_COINS;
    if buys_left == 0 || !affordable_any {
        return Decision::EndTurn;
    }

    let decision = strategy.choose_buy(&BuyCtx::new(game, coins, me_idx, state));
    debug!(
        me_idx,
        coins,
        buys_left,
        gardens_plan = state.gardens_plan,
        %decision,
        "buy phase"
    );

    if let Decision::Buy(card) = decision {
        state.record_buy(card, cards::cost(card).unwrap_or(0), coins);
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::common::{game_with_stock, hand, player_named, with_players};

    fn game(hand_cards: &[(&str, u32)], stock: &[(&str, u32)]) -> GameSnapshot {
        with_players(
            game_with_stock(stock),
            vec![
                player_named("Deckbot", 0, Some(hand(hand_cards))),
                player_named("opponent", 0, None),
            ],
        )
    }

    #[test]
    fn test_plays_actions_before_buying() {
        let g = game(&[("village", 1), ("copper", 3)], &[("silver", 40)]);
        let mut state = TurnState::default();
        state.start_turn();
        assert_eq!(
            decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline),
            Decision::Action("village")
        );
        assert_eq!(state.phase, Phase::Action);
    }

    #[test]
    fn test_buys_with_treasure_and_records_it() {
        let g = game(&[("gold", 2)], &[("province", 12), ("gold", 30)]);
        let mut state = TurnState::default();
        for _ in 0..5 {
            state.start_turn();
        }
        let decision = decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline);
        assert_eq!(decision, Decision::Buy("gold"));
        assert_eq!(state.phase, Phase::Buy);
        assert_eq!(state.coins_left, 0);
        assert_eq!(state.buys_left, 0);
        assert_eq!(state.count("gold"), 1);
        assert!(state.bought);
    }

    #[test]
    fn test_ends_turn_when_broke_or_out_of_buys() {
        let g = game(&[("copper", 2)], &[("silver", 40)]);
        let mut state = TurnState::default();
        state.start_turn();
        assert_eq!(
            decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline),
            Decision::EndTurn
        );

        let g = game(&[("gold", 2)], &[("gold", 30)]);
        let mut state = TurnState::default();
        state.start_turn();
        state.buys_left = 0;
        assert_eq!(
            decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline),
            Decision::EndTurn
        );
    }

    #[test]
    fn test_market_bonus_counts_toward_buy() {
        let g = game(&[("market", 1), ("copper", 2)], &[("silver", 40)]);
        let mut state = TurnState::default();
        for _ in 0..5 {
            state.start_turn();
        }
        assert_eq!(
            decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline),
            Decision::Action("market")
        );
        // The server drops the market from our hand once played
        let g = game(&[("copper", 2)], &[("silver", 40)]);
        assert_eq!(
            decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline),
            Decision::Buy("silver")
        );
        assert_eq!(state.coins_left, 0);
    }

    #[test]
    fn test_absurd_treasure_count_still_buys() {
        let g = game(&[("silver", 3_000_000_000)], &[("province", 8), ("gold", 30)]);
        let mut state = TurnState::default();
        for _ in 0..20 {
            state.start_turn();
        }
        state.action_coins = 5;
        let decision = decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline);
        assert!(matches!(decision, Decision::Buy(_)), "{decision}");
        assert_eq!(state.buys_left, 0);
    }

    #[test]
    fn test_gardens_plan_decided_once() {
        let g = game(&[("copper", 1)], &[("silver", 40)]);
        let mut state = TurnState::default();
        decide_play(&g, &mut state, "Deckbot", StrategyKind::Baseline);
        assert_eq!(state.gardens_plan, Some(false));
    }
}
