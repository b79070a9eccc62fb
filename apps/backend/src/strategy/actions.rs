//! Action phase
//!
//! Picks which action card to play from our hand. Pickers run in priority
//! order: deck trashing, non-terminal engine cards, attacks, terminal draw,
//! then gainers. The chosen card's bonuses are credited to the turn state.

use super::cards::{self, MIN_COPPER_TRASH};
use super::helpers::player;
use super::state::TurnState;
use super::Decision;
use crate::dto::game_snapshot::{CardCounts, GameSnapshot};

const NON_TERMINAL_ORDER: [&str; 10] = [
    "village",
    "market",
    "laboratory",
    "festival",
    "distantshore",
    "port",
    "cellar",
    "farmingvillage",
    "magpie",
    "poacher",
];
const ATTACK_ORDER: [&str; 4] = ["witch", "militia", "bandit", "bureaucrat"];
const TERMINAL_DRAW_ORDER: [&str; 4] = ["councilroom", "smithy", "library", "adventurer"];
const ECONOMY_ORDER: [&str; 3] = ["mine", "feast", "workshop"];

/// Use up one action for `card` and credit what playing it grants.
fn play(card: &'static str, actions_left: u32, state: &mut TurnState) -> Decision {
    state.actions_left = actions_left.saturating_sub(1) + cards::plus_actions(card);
    state.action_coins = state.action_coins.saturating_add(cards::coin_bonus(card));
    state.extra_buys = state.extra_buys.saturating_add(cards::buy_bonus(card));
    Decision::Action(card)
}

fn first_held(hand: &CardCounts, order: &[&'static str]) -> Option<&'static str> {
    order.iter().copied().find(|card| hand.get(card) > 0)
}

fn act_trashing(hand: &CardCounts, actions_left: u32, state: &mut TurnState) -> Option<Decision> {
    let has_junk = hand.get("curse") > 0
        || hand.get("estate") > 0
        || hand.get("copper") >= MIN_COPPER_TRASH;
    if hand.get("chapel") > 0 && has_junk {
        return Some(play("chapel", actions_left, state));
    }
    if hand.get("moneylender") > 0 && hand.get("copper") > 0 {
        return Some(play("moneylender", actions_left, state));
    }
    // Remake trashes twice, prefer it
    first_held(hand, &["remake", "remodel"]).map(|card| play(card, actions_left, state))
}

fn act_from(
    order: &[&'static str],
    hand: &CardCounts,
    actions_left: u32,
    state: &mut TurnState,
) -> Option<Decision> {
    first_held(hand, order).map(|card| play(card, actions_left, state))
}

/// Decide which action to play on this call, if any.
pub fn choose_action(game: &GameSnapshot, me_idx: usize, state: &mut TurnState) -> Option<Decision> {
    let hand = player(game, me_idx)?.hand.as_ref()?;

    let actions_left = state.actions_left;
    if actions_left == 0 {
        return None;
    }

    let actionable = hand
        .quantities
        .iter()
        .any(|(card, n)| *n > 0 && cards::is_action(card));
    if !actionable {
        return None;
    }

    act_trashing(hand, actions_left, state)
        .or_else(|| act_from(&NON_TERMINAL_ORDER, hand, actions_left, state))
        .or_else(|| act_from(&ATTACK_ORDER, hand, actions_left, state))
        .or_else(|| act_from(&TERMINAL_DRAW_ORDER, hand, actions_left, state))
        .or_else(|| act_from(&ECONOMY_ORDER, hand, actions_left, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::common::{game_with_players, hand, player_named};

    fn game_holding(cards: &[(&str, u32)]) -> GameSnapshot {
        game_with_players(vec![player_named("me", 0, Some(hand(cards)))])
    }

    #[test]
    fn test_prefers_trashing_then_nonterminal_order() {
        // Chapel with junk beats Village
        let game = game_holding(&[("chapel", 1), ("estate", 1), ("village", 1)]);
        let mut state = TurnState::default();
        assert_eq!(choose_action(&game, 0, &mut state), Some(Decision::Action("chapel")));
        assert_eq!(state.actions_left, 0);
    }

    #[test]
    fn test_chapel_without_junk_is_skipped() {
        let game = game_holding(&[("chapel", 1), ("copper", 1), ("village", 1)]);
        let mut state = TurnState::default();
        assert_eq!(choose_action(&game, 0, &mut state), Some(Decision::Action("village")));
        assert_eq!(state.actions_left, 2);
    }

    #[test]
    fn test_grants_bonuses_on_nonterminal() {
        let game = game_holding(&[("market", 1)]);
        let mut state = TurnState::default();
        assert_eq!(choose_action(&game, 0, &mut state), Some(Decision::Action("market")));
        assert_eq!(state.action_coins, 1);
        assert_eq!(state.extra_buys, 1);
        assert_eq!(state.actions_left, 1);
    }

    #[test]
    fn test_moneylender_needs_copper() {
        let game = game_holding(&[("moneylender", 1), ("copper", 1)]);
        let mut state = TurnState::default();
        assert_eq!(
            choose_action(&game, 0, &mut state),
            Some(Decision::Action("moneylender"))
        );
        assert_eq!(state.action_coins, 3);

        let game = game_holding(&[("moneylender", 1), ("silver", 1), ("smithy", 1)]);
        let mut state = TurnState::default();
        assert_eq!(choose_action(&game, 0, &mut state), Some(Decision::Action("smithy")));
    }

    #[test]
    fn test_attacks_before_terminal_draw() {
        let game = game_holding(&[("smithy", 1), ("militia", 1)]);
        let mut state = TurnState::default();
        assert_eq!(choose_action(&game, 0, &mut state), Some(Decision::Action("militia")));
    }

    #[test]
    fn test_nothing_to_play() {
        let mut state = TurnState::default();
        let game = game_holding(&[("copper", 3), ("estate", 2)]);
        assert_eq!(choose_action(&game, 0, &mut state), None);

        let game = game_with_players(vec![player_named("me", 0, None)]);
        assert_eq!(choose_action(&game, 0, &mut state), None);

        let game = game_holding(&[("village", 1)]);
        state.actions_left = 0;
        assert_eq!(choose_action(&game, 0, &mut state), None);
    }
}
