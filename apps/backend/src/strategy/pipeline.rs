//! Baseline buy strategy
//!
//! An ordered list of steps; the first one with an opinion wins, and the
//! turn ends when none has one.

use super::buys::*;
use super::cards::BUY_PROVINCE_COINS;
use super::helpers::score_status;
use super::state::{Counts, TurnState};
use super::Decision;
use crate::dto::game_snapshot::GameSnapshot;

/// What every step gets to look at.
pub struct BuyCtx<'a> {
    pub game: &'a GameSnapshot,
    pub coins: u32,
    pub counts: &'a Counts,
    pub turn: u32,
    pub provinces_left: u32,
    pub my_score: i32,
    pub best_opp: i32,
    pub gardens_plan: bool,
}

impl<'a> BuyCtx<'a> {
    pub fn new(game: &'a GameSnapshot, coins: u32, me_idx: usize, state: &'a TurnState) -> Self {
        let (my_score, best_opp) = score_status(game, me_idx);
        Self {
            game,
            coins,
            counts: &state.counts,
            turn: state.turn.max(1),
            provinces_left: game.stock_of("province"),
            my_score,
            best_opp,
            gardens_plan: state.gardens_plan.unwrap_or(false),
        }
    }

    pub fn score_gap(&self) -> i32 {
        self.my_score.saturating_sub(self.best_opp)
    }

    fn province_ok(&self) -> bool {
        early_province_ok(self.counts, self.provinces_left, self.turn, self.score_gap())
    }
}

type Step = fn(&BuyCtx<'_>) -> Option<Decision>;

fn step_opening(ctx: &BuyCtx<'_>) -> Option<Decision> {
    opening_buys(ctx.game, ctx.coins, ctx.counts, ctx.turn)
}

fn step_province_if_ok(ctx: &BuyCtx<'_>) -> Option<Decision> {
    (ctx.coins >= BUY_PROVINCE_COINS && ctx.game.in_stock("province") && ctx.province_ok())
        .then_some(Decision::Buy("province"))
}

/// Province money but the deck is not ready: build with Gold instead.
fn step_gold_if_building(ctx: &BuyCtx<'_>) -> Option<Decision> {
    (ctx.coins >= BUY_PROVINCE_COINS && ctx.game.in_stock("gold") && !ctx.province_ok())
        .then_some(Decision::Buy("gold"))
}

fn step_endgame(ctx: &BuyCtx<'_>) -> Option<Decision> {
    endgame_buy(ctx.game, ctx.coins, ctx.provinces_left, ctx.turn)
}

fn step_midgame(ctx: &BuyCtx<'_>) -> Option<Decision> {
    midgame_buy(
        ctx.game,
        ctx.coins,
        ctx.provinces_left,
        ctx.my_score,
        ctx.best_opp,
        ctx.turn,
    )
}

fn step_gardens_primary(ctx: &BuyCtx<'_>) -> Option<Decision> {
    (ctx.gardens_plan && ctx.coins >= 4 && ctx.game.in_stock("gardens"))
        .then_some(Decision::Buy("gardens"))
}

fn step_gardens_secondary(ctx: &BuyCtx<'_>) -> Option<Decision> {
    if !ctx.gardens_plan {
        return None;
    }
    five_cost_buy(ctx.game, ctx.coins, ctx.counts, true)
}

fn step_economy(ctx: &BuyCtx<'_>) -> Option<Decision> {
    economy_buy(ctx.game, ctx.coins)
}

fn step_six(ctx: &BuyCtx<'_>) -> Option<Decision> {
    six_cost_buy(ctx.game, ctx.coins, ctx.counts, ctx.turn)
}

fn step_five(ctx: &BuyCtx<'_>) -> Option<Decision> {
    five_cost_buy(ctx.game, ctx.coins, ctx.counts, false)
}

fn step_four(ctx: &BuyCtx<'_>) -> Option<Decision> {
    four_cost_buy(ctx.game, ctx.coins, ctx.counts)
}

fn step_three(ctx: &BuyCtx<'_>) -> Option<Decision> {
    three_cost_buy(ctx.game, ctx.coins)
}

const STEPS: [Step; 12] = [
    step_opening,
    step_province_if_ok,
    step_gold_if_building,
    step_endgame,
    step_midgame,
    step_gardens_primary,
    step_gardens_secondary,
    step_economy, // Gold before the $6 specials
    step_six,
    step_five,
    step_four,
    step_three,
];

pub fn choose_buy_action(ctx: &BuyCtx<'_>) -> Decision {
    STEPS
        .iter()
        .find_map(|step| step(ctx))
        .unwrap_or(Decision::EndTurn)
}
