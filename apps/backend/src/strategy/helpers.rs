use std::cmp::Reverse;

use super::cards;
use super::state::{count, Counts};
use crate::dto::game_snapshot::{GameSnapshot, PlayerSnapshot};

/// Locate our seat in the player list.
///
/// A player whose name contains `bot_name` wins (the server decorates names
/// with the bot's base URL). Otherwise the only player holding a hand is us.
/// Otherwise seat 1 when there is one, else seat 0.
pub fn find_me(game: &GameSnapshot, bot_name: &str) -> usize {
    if let Some(idx) = game
        .players
        .iter()
        .position(|p| !bot_name.is_empty() && p.name.contains(bot_name))
    {
        return idx;
    }

    let mut with_hand = game
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.hand.is_some())
        .map(|(idx, _)| idx);
    if let (Some(idx), None) = (with_hand.next(), with_hand.next()) {
        return idx;
    }

    if game.players.len() > 1 {
        1
    } else {
        0
    }
}

pub fn player(game: &GameSnapshot, me_idx: usize) -> Option<&PlayerSnapshot> {
    game.players.get(me_idx)
}

/// Our score and the best opponent score (0 with no opponents).
pub fn score_status(game: &GameSnapshot, me_idx: usize) -> (i32, i32) {
    let mine = player(game, me_idx).map(|p| p.score).unwrap_or(0);
    let best_opp = game
        .players
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != me_idx)
        .map(|(_, p)| p.score)
        .max()
        .unwrap_or(0);
    (mine, best_opp)
}

pub fn score_gap(game: &GameSnapshot, me_idx: usize) -> i32 {
    let (mine, best_opp) = score_status(game, me_idx);
    mine.saturating_sub(best_opp)
}

/// How many more terminal actions the deck supports without collisions.
pub fn terminal_capacity(counts: &Counts) -> i32 {
    let terminals = count(counts, "smithy") + count(counts, "woodcutter");
    let plus_actions = count(counts, "village") * 2
        + count(counts, "market")
        + count(counts, "festival") * 2
        + count(counts, "laboratory");
    1 + plus_actions as i32 - terminals as i32
}

/// Coins from the treasure cards in our hand, before action bonuses.
/// Saturates instead of overflowing on absurd hand counts.
pub fn treasure_coins(game: &GameSnapshot, me_idx: usize) -> u32 {
    player(game, me_idx)
        .and_then(|p| p.hand.as_ref())
        .map(|hand| {
            ["copper", "silver", "gold"]
                .iter()
                .map(|card| hand.get(card).saturating_mul(cards::treasure_value(card)))
                .fold(0u32, u32::saturating_add)
        })
        .unwrap_or(0)
}

/// Highest-priority card, ties broken alphabetically.
pub fn best_from(options: &[String]) -> Option<&str> {
    options
        .iter()
        .min_by(|a, b| {
            Reverse(cards::priority(a))
                .cmp(&Reverse(cards::priority(b)))
                .then_with(|| a.cmp(b))
        })
        .map(String::as_str)
}

/// Card we would miss least: junk first, then copper, then the
/// lowest-priority card. The first one wins ties.
pub fn worst_in_hand(hand: &[String]) -> Option<&str> {
    hand.iter()
        .min_by_key(|card| {
            let class = if cards::is_junk(card) {
                0
            } else if card.as_str() == "copper" {
                1
            } else {
                2
            };
            (class, cards::priority(card))
        })
        .map(String::as_str)
}

/// Money card to give up when upgrading treasure: copper if we hold one.
pub fn cheapest_money(money: &[String]) -> Option<&str> {
    if money.iter().any(|card| card == "copper") {
        return Some("copper");
    }
    money
        .iter()
        .min_by_key(|card| cards::priority(card))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::common::{counts, game_with_players, hand, player_named};

    fn strings(cards: &[&str]) -> Vec<String> {
        cards.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_best_from_prefers_priority_then_alpha() {
        assert_eq!(best_from(&strings(&["silver", "estate", "gold"])), Some("gold"));
        // Both unknown: alphabetical
        assert_eq!(best_from(&strings(&["witch", "chapel"])), Some("chapel"));
        assert_eq!(best_from(&[]), None);
    }

    #[test]
    fn test_worst_in_hand_prefers_junk_then_copper() {
        assert_eq!(worst_in_hand(&strings(&["estate", "copper", "village"])), Some("estate"));
        assert_eq!(worst_in_hand(&strings(&["village", "copper", "gold"])), Some("copper"));
        assert_eq!(worst_in_hand(&strings(&["gold", "village"])), Some("village"));
        assert_eq!(worst_in_hand(&strings(&["curse", "estate"])), Some("curse"));
    }

    #[test]
    fn test_cheapest_money_takes_copper_first() {
        assert_eq!(cheapest_money(&strings(&["gold", "copper"])), Some("copper"));
        assert_eq!(cheapest_money(&strings(&["gold", "silver"])), Some("silver"));
        assert_eq!(cheapest_money(&[]), None);
    }

    #[test]
    fn test_terminal_capacity_simple() {
        // base 1 action +2 from village -1 terminal = 2
        let c = counts(&[("village", 1), ("smithy", 1)]);
        assert_eq!(terminal_capacity(&c), 2);
        let c = counts(&[("smithy", 2), ("woodcutter", 1)]);
        assert_eq!(terminal_capacity(&c), -2);
    }

    #[test]
    fn test_find_me_by_name_then_hand_then_default() {
        let game = game_with_players(vec![
            player_named("[http://bot/] Deckbot (1)", 0, None),
            player_named("other", 0, Some(hand(&[("copper", 5)]))),
        ]);
        assert_eq!(find_me(&game, "Deckbot"), 0);
        assert_eq!(find_me(&game, "Nobody"), 1);

        let game = game_with_players(vec![
            player_named("a", 0, None),
            player_named("b", 0, None),
            player_named("c", 0, None),
        ]);
        assert_eq!(find_me(&game, "Nobody"), 1);

        let game = game_with_players(vec![player_named("solo", 0, None)]);
        assert_eq!(find_me(&game, "Nobody"), 0);
    }

    #[test]
    fn test_score_status_and_treasure() {
        let game = game_with_players(vec![
            player_named("me", 7, Some(hand(&[("copper", 2), ("silver", 1), ("gold", 1)]))),
            player_named("a", 12, None),
            player_named("b", 3, None),
        ]);
        assert_eq!(score_status(&game, 0), (7, 12));
        assert_eq!(score_gap(&game, 0), -5);
        assert_eq!(treasure_coins(&game, 0), 7);
        assert_eq!(treasure_coins(&game, 1), 0);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let game = game_with_players(vec![
            player_named("me", i32::MIN, Some(hand(&[("silver", 3_000_000_000), ("gold", 1)]))),
            player_named("a", i32::MAX, None),
        ]);
        assert_eq!(treasure_coins(&game, 0), u32::MAX);
        assert_eq!(score_gap(&game, 0), i32::MIN);
        assert_eq!(score_gap(&game, 1), i32::MAX);
    }
}
