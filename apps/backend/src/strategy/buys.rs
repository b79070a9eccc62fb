//! Buy heuristics
//!
//! Building blocks for the buy strategies: engine readiness, greening
//! pressure and the per-price-point wishlists. Each returns `None` when it
//! has no opinion so callers can chain them.

use super::cards::*;
use super::helpers::{score_gap, terminal_capacity};
use super::state::{count, Counts};
use super::Decision;
use crate::dto::game_snapshot::GameSnapshot;

fn first_in_stock(game: &GameSnapshot, order: &[&'static str]) -> Option<&'static str> {
    order.iter().copied().find(|card| game.in_stock(card))
}

fn buy_first(game: &GameSnapshot, order: &[&'static str]) -> Option<Decision> {
    first_in_stock(game, order).map(Decision::Buy)
}

// ---- engine readiness & early green ----

/// Whether the deck can reach $8 often enough to start greening.
pub fn engine_ready(counts: &Counts) -> bool {
    count(counts, "gold") >= ENGINE_GOLD_THRESHOLD
        || count(counts, "laboratory") >= ENGINE_LAB_THRESHOLD
        || count(counts, "market") + count(counts, "festival") >= ENGINE_MF_SUM_THRESHOLD
        || (count(counts, "village") >= 1
            && count(counts, "smithy") + count(counts, "councilroom") + count(counts, "library")
                >= 1)
}

/// Whether buying a Province now would not end the game before our deck
/// is ready.
pub fn early_province_ok(counts: &Counts, provinces_left: u32, turn: u32, score_gap: i32) -> bool {
    if turn >= RUSH_TURN || provinces_left <= EARLY_PROVINCE_STOCK || engine_ready(counts) {
        return true;
    }
    if turn < MIN_GREEN_TURN && score_gap > -BEHIND_DUCHY_DEFICIT {
        return false;
    }
    if turn < PROVINCE_SOFT_CAP_BEFORE_TURN
        && count(counts, "province") >= PROVINCES_ALLOWED_BEFORE_CAP
    {
        return false;
    }
    score_gap <= -BEHIND_DUCHY_DEFICIT || turn >= MIN_GREEN_TURN
}

/// Decide once per match whether to pursue Gardens.
pub fn should_pivot_to_gardens(game: &GameSnapshot, me_idx: usize) -> bool {
    if !game.in_stock("gardens") || game.stock_of("province") < GARDENS_PIVOT_MIN_PROVINCES {
        return false;
    }
    let buys_exist = game.in_stock("market") || game.in_stock("festival");
    score_gap(game, me_idx) <= -(BEHIND_DUCHY_DEFICIT + 4) && buys_exist
}

// ---- mid/end game VP pressure ----

fn green_by_coins(game: &GameSnapshot, coins: u32) -> Option<Decision> {
    if coins >= BUY_PROVINCE_COINS && game.in_stock("province") {
        return Some(Decision::Buy("province"));
    }
    if coins >= BUY_5_COST_COINS && game.in_stock("duchy") {
        return Some(Decision::Buy("duchy"));
    }
    if coins >= BUY_SILVER_COINS && game.in_stock("estate") {
        return Some(Decision::Buy("estate"));
    }
    None
}

pub fn endgame_buy(game: &GameSnapshot, coins: u32, provinces_left: u32, turn: u32) -> Option<Decision> {
    if turn >= RUSH_TURN || provinces_left <= ENDGAME_PROVINCE_THRESHOLD {
        return green_by_coins(game, coins);
    }
    None
}

pub fn midgame_buy(
    game: &GameSnapshot,
    coins: u32,
    provinces_left: u32,
    my_score: i32,
    best_opp: i32,
    turn: u32,
) -> Option<Decision> {
    if turn >= RUSH_TURN && coins >= BUY_PROVINCE_COINS && game.in_stock("province") {
        return Some(Decision::Buy("province"));
    }
    if provinces_left <= MIDGAME_PROVINCE_THRESHOLD {
        if coins >= BUY_PROVINCE_COINS && game.in_stock("province") {
            return Some(Decision::Buy("province"));
        }
        if coins >= BUY_5_COST_COINS && game.in_stock("duchy") && my_score <= best_opp {
            return Some(Decision::Buy("duchy"));
        }
    }
    if best_opp.saturating_sub(my_score) >= BEHIND_DUCHY_DEFICIT
        && coins >= BUY_5_COST_COINS
        && game.in_stock("duchy")
    {
        return Some(Decision::Buy("duchy"));
    }
    None
}

// ---- value buys by price point ----

pub fn economy_buy(game: &GameSnapshot, coins: u32) -> Option<Decision> {
    (coins >= BUY_GOLD_COINS && game.in_stock("gold")).then_some(Decision::Buy("gold"))
}

/// Ordered wishlist at the $5 price point.
pub fn five_wishlist(
    game: &GameSnapshot,
    counts: &Counts,
    coins: u32,
    gardens_plan: bool,
) -> Vec<&'static str> {
    let mut picks = Vec::new();
    if game.in_stock("curse") && game.in_stock("witch") {
        picks.push("witch");
    }
    if game.in_stock("laboratory") && count(counts, "laboratory") < MAX_LABS {
        picks.push("laboratory");
    }
    if terminal_capacity(counts) <= 0 {
        picks.extend(["market", "festival"].into_iter().filter(|c| game.in_stock(c)));
        if game.in_stock("village") && coins >= BUY_4_COST_COINS {
            picks.push("village");
        }
    }
    if gardens_plan {
        picks.extend(
            ["market", "festival", "laboratory"]
                .into_iter()
                .filter(|c| game.in_stock(c)),
        );
    }
    picks.extend(FIVE_COST_PREFER.into_iter().filter(|c| game.in_stock(c)));
    if game.in_stock("silver") {
        picks.push("silver");
    }
    picks
}

pub fn five_cost_buy(
    game: &GameSnapshot,
    coins: u32,
    counts: &Counts,
    gardens_plan: bool,
) -> Option<Decision> {
    if coins < BUY_5_COST_COINS {
        return None;
    }
    five_wishlist(game, counts, coins, gardens_plan)
        .first()
        .copied()
        .map(Decision::Buy)
}

pub fn four_cost_buy(game: &GameSnapshot, coins: u32, counts: &Counts) -> Option<Decision> {
    if coins < BUY_4_COST_COINS {
        return None;
    }
    if let Some(pick) = buy_first(
        game,
        &["moneylender", "militia", "port", "poacher", "remodel", "remake"],
    ) {
        return Some(pick);
    }
    if terminal_capacity(counts) <= 0 && game.in_stock("village") {
        return Some(Decision::Buy("village"));
    }
    buy_first(game, &["smithy", "gardens", "silver"])
}

pub fn three_cost_buy(game: &GameSnapshot, coins: u32) -> Option<Decision> {
    if coins < BUY_SILVER_COINS {
        return None;
    }
    buy_first(game, &["workshop", "village", "woodcutter", "silver"])
}

// ---- openings ----

fn opening_buy_5plus(game: &GameSnapshot) -> Option<Decision> {
    if game.in_stock("curse") && game.in_stock("witch") {
        return Some(Decision::Buy("witch"));
    }
    buy_first(game, &["laboratory", "market", "festival", "councilroom"])
}

fn opening_buy_4(game: &GameSnapshot) -> Option<Decision> {
    buy_first(
        game,
        &[
            "moneylender",
            "militia",
            "smithy",
            "remodel",
            "remake",
            "poacher",
            "port",
            "village",
            "silver",
        ],
    )
}

fn opening_buy_3(game: &GameSnapshot) -> Option<Decision> {
    buy_first(game, &["workshop", "village", "woodcutter", "silver"])
}

fn opening_buy_2(game: &GameSnapshot, counts: &Counts) -> Option<Decision> {
    if count(counts, "chapel") == 0 && game.in_stock("chapel") {
        return Some(Decision::Buy("chapel"));
    }
    buy_first(game, &["cellar", "estate"])
}

/// First turns: trashers, attacks and economy.
pub fn opening_buys(game: &GameSnapshot, coins: u32, counts: &Counts, turn: u32) -> Option<Decision> {
    if turn > OPENING_TURN_LIMIT {
        return None;
    }
    match coins {
        c if c >= BUY_5_COST_COINS => opening_buy_5plus(game),
        BUY_4_COST_COINS => opening_buy_4(game),
        BUY_SILVER_COINS => opening_buy_3(game),
        BUY_2_COST_COINS => opening_buy_2(game, counts),
        _ => None,
    }
}

// ---- $6 specials ----

pub fn six_cost_buy(game: &GameSnapshot, coins: u32, counts: &Counts, turn: u32) -> Option<Decision> {
    if coins < BUY_GOLD_COINS {
        return None;
    }
    if game.in_stock("hireling") && count(counts, "hireling") == 0 && turn <= EARLY_HIRELING_TURN {
        return Some(Decision::Buy("hireling"));
    }
    if game.in_stock("distantshore")
        && engine_ready(counts)
        && turn < RUSH_TURN - EARLY_HIRELING_TURN
    {
        return Some(Decision::Buy("distantshore"));
    }
    None
}
