//! Alternative buy strategies, selectable by name.

use std::fmt;
use std::str::FromStr;

use super::cards::*;
use super::helpers::terminal_capacity;
use super::pipeline::{self, BuyCtx};
use super::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Baseline,
    BmSmithy,
    VillageSmithy,
    MilitiaMarketCounter,
    RemodelMarketEngine,
    AttackLockGardens,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Baseline,
        StrategyKind::BmSmithy,
        StrategyKind::VillageSmithy,
        StrategyKind::MilitiaMarketCounter,
        StrategyKind::RemodelMarketEngine,
        StrategyKind::AttackLockGardens,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::Baseline => "baseline",
            StrategyKind::BmSmithy => "bm_smithy",
            StrategyKind::VillageSmithy => "village_smithy",
            StrategyKind::MilitiaMarketCounter => "militia_market_counter",
            StrategyKind::RemodelMarketEngine => "remodel_market_engine",
            StrategyKind::AttackLockGardens => "attack_lock_gardens",
        }
    }

    pub fn choose_buy(self, ctx: &BuyCtx<'_>) -> Decision {
        match self {
            StrategyKind::Baseline => pipeline::choose_buy_action(ctx),
            StrategyKind::BmSmithy => bm_smithy(ctx),
            StrategyKind::VillageSmithy => village_smithy(ctx),
            StrategyKind::MilitiaMarketCounter => militia_market_counter(ctx),
            StrategyKind::RemodelMarketEngine => remodel_market_engine(ctx),
            StrategyKind::AttackLockGardens => attack_lock_gardens(ctx),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {0:?}")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

fn buy_if(cond: bool, card: &'static str) -> Option<Decision> {
    cond.then_some(Decision::Buy(card))
}

fn buy_first_in_stock(ctx: &BuyCtx<'_>, order: &[&'static str]) -> Option<Decision> {
    order
        .iter()
        .copied()
        .find(|card| ctx.game.in_stock(card))
        .map(Decision::Buy)
}

/// Greening fallback shared by the alternative strategies.
fn vp_pressure(ctx: &BuyCtx<'_>) -> Option<Decision> {
    let (game, coins, turn) = (ctx.game, ctx.coins, ctx.turn);
    let provinces_left = ctx.provinces_left;
    let late = |margin: u32| turn >= RUSH_TURN - margin;

    if coins >= BUY_PROVINCE_COINS
        && game.in_stock("province")
        && (provinces_left <= ENDGAME_PROVINCE_THRESHOLD || late(3))
    {
        return Some(Decision::Buy("province"));
    }
    if coins >= BUY_5_COST_COINS
        && game.in_stock("duchy")
        && (provinces_left <= ENDGAME_PROVINCE_THRESHOLD || late(1))
    {
        return Some(Decision::Buy("duchy"));
    }
    buy_if(
        coins >= BUY_2_COST_COINS
            && game.in_stock("estate")
            && (provinces_left <= ENDGAME_PROVINCE_THRESHOLD || late(0)),
        "estate",
    )
}

/// Big Money with at most two Smithies.
fn bm_smithy(ctx: &BuyCtx<'_>) -> Decision {
    let (game, coins) = (ctx.game, ctx.coins);
    let held = |card: &str| ctx.counts.get(card).copied().unwrap_or(0);

    vp_pressure(ctx)
        .or_else(|| buy_if(coins >= BUY_PROVINCE_COINS && game.in_stock("province"), "province"))
        .or_else(|| buy_if(coins >= BUY_GOLD_COINS && game.in_stock("gold"), "gold"))
        .or_else(|| {
            buy_if(
                coins >= BUY_5_COST_COINS && held("smithy") < MAX_SMITHIES && game.in_stock("smithy"),
                "smithy",
            )
        })
        .or_else(|| {
            if coins >= BUY_5_COST_COINS {
                buy_first_in_stock(ctx, &["laboratory", "duchy"])
            } else {
                None
            }
        })
        .or_else(|| buy_if(coins >= BUY_SILVER_COINS && game.in_stock("silver"), "silver"))
        .unwrap_or(Decision::EndTurn)
}

/// Village/Smithy engine, soft caps of six Villages and five Smithies.
fn village_smithy(ctx: &BuyCtx<'_>) -> Decision {
    let (game, coins, turn) = (ctx.game, ctx.coins, ctx.turn);
    let held = |card: &str| ctx.counts.get(card).copied().unwrap_or(0);
    let cap = terminal_capacity(ctx.counts);

    vp_pressure(ctx)
        .or_else(|| buy_if(coins >= BUY_PROVINCE_COINS && game.in_stock("province"), "province"))
        .or_else(|| buy_if(coins >= BUY_GOLD_COINS && game.in_stock("gold"), "gold"))
        .or_else(|| {
            if coins < BUY_5_COST_COINS {
                return None;
            }
            buy_first_in_stock(ctx, &["laboratory", "market", "festival"])
                .or_else(|| buy_if(cap > 0 && held("smithy") < 5 && game.in_stock("smithy"), "smithy"))
                .or_else(|| buy_if(game.in_stock("duchy") && turn >= RUSH_TURN - 4, "duchy"))
        })
        .or_else(|| {
            if coins < BUY_4_COST_COINS {
                return None;
            }
            buy_if(game.in_stock("village") && held("village") < 6, "village").or_else(|| {
                buy_first_in_stock(
                    ctx,
                    &["moneylender", "militia", "remodel", "remake", "port", "poacher"],
                )
            })
        })
        .or_else(|| buy_if(coins >= BUY_SILVER_COINS && game.in_stock("silver"), "silver"))
        .unwrap_or(Decision::EndTurn)
}

/// Counter to fast draw engines: one Militia, one Gold, up to five Markets,
/// then Smithies, Villages and a single Cellar.
fn militia_market_counter(ctx: &BuyCtx<'_>) -> Decision {
    let (game, coins) = (ctx.game, ctx.coins);
    let held = |card: &str| ctx.counts.get(card).copied().unwrap_or(0);
    let cap = terminal_capacity(ctx.counts);

    vp_pressure(ctx)
        .or_else(|| buy_if(coins >= BUY_PROVINCE_COINS && game.in_stock("province"), "province"))
        .or_else(|| {
            buy_if(
                held("militia") == 0 && coins >= BUY_4_COST_COINS && game.in_stock("militia"),
                "militia",
            )
        })
        .or_else(|| {
            buy_if(
                coins >= BUY_5_COST_COINS && held("market") < 5 && game.in_stock("market"),
                "market",
            )
        })
        .or_else(|| {
            buy_if(
                held("gold") == 0 && coins >= BUY_GOLD_COINS && game.in_stock("gold"),
                "gold",
            )
        })
        .or_else(|| {
            buy_if(
                coins >= BUY_5_COST_COINS
                    && held("smithy") < 5
                    && cap > 0
                    && game.in_stock("smithy"),
                "smithy",
            )
        })
        .or_else(|| {
            buy_if(
                coins >= BUY_4_COST_COINS && held("village") < 6 && game.in_stock("village"),
                "village",
            )
        })
        .or_else(|| {
            buy_if(
                coins >= BUY_2_COST_COINS && held("cellar") == 0 && game.in_stock("cellar"),
                "cellar",
            )
        })
        .or_else(|| buy_if(coins >= BUY_GOLD_COINS && game.in_stock("gold"), "gold"))
        .or_else(|| buy_if(coins >= BUY_SILVER_COINS && game.in_stock("silver"), "silver"))
        .unwrap_or(Decision::EndTurn)
}

/// Remodel opener aiming for two Golds, a Militia, up to four Markets and
/// a Cellar, with Villages and capped Smithies for draw.
fn remodel_market_engine(ctx: &BuyCtx<'_>) -> Decision {
    let (game, coins) = (ctx.game, ctx.coins);
    let held = |card: &str| ctx.counts.get(card).copied().unwrap_or(0);
    let cap = terminal_capacity(ctx.counts);

    vp_pressure(ctx)
        .or_else(|| buy_if(coins >= BUY_PROVINCE_COINS && game.in_stock("province"), "province"))
        .or_else(|| {
            buy_if(
                held("remodel") == 0 && coins >= BUY_4_COST_COINS && game.in_stock("remodel"),
                "remodel",
            )
        })
        .or_else(|| {
            buy_if(
                held("gold") < 2 && coins >= BUY_GOLD_COINS && game.in_stock("gold"),
                "gold",
            )
        })
        .or_else(|| {
            buy_if(
                held("militia") == 0 && coins >= BUY_4_COST_COINS && game.in_stock("militia"),
                "militia",
            )
        })
        .or_else(|| {
            buy_if(
                coins >= BUY_5_COST_COINS && held("market") < 4 && game.in_stock("market"),
                "market",
            )
        })
        .or_else(|| {
            buy_if(
                held("cellar") == 0 && coins >= BUY_2_COST_COINS && game.in_stock("cellar"),
                "cellar",
            )
        })
        .or_else(|| buy_if(coins >= BUY_4_COST_COINS && game.in_stock("village"), "village"))
        .or_else(|| {
            buy_if(
                coins >= BUY_5_COST_COINS
                    && cap > 0
                    && held("smithy") < MAX_SMITHIES
                    && game.in_stock("smithy"),
                "smithy",
            )
        })
        .or_else(|| buy_if(coins >= BUY_GOLD_COINS && game.in_stock("gold"), "gold"))
        .or_else(|| buy_if(coins >= BUY_SILVER_COINS && game.in_stock("silver"), "silver"))
        .unwrap_or(Decision::EndTurn)
}

/// Attack pressure with Bandit and Bureaucrat, Chancellor cycling, and a
/// Gardens pivot when trailing with +Buy available.
fn attack_lock_gardens(ctx: &BuyCtx<'_>) -> Decision {
    let (game, coins, turn) = (ctx.game, ctx.coins, ctx.turn);
    let held = |card: &str| ctx.counts.get(card).copied().unwrap_or(0);
    let cap = terminal_capacity(ctx.counts);
    let provinces_left = ctx.provinces_left;
    let score_gap = ctx.score_gap();
    let buys_exist = game.in_stock("market") || game.in_stock("festival");

    if let Some(decision) = vp_pressure(ctx) {
        return decision;
    }

    if coins >= BUY_PROVINCE_COINS && game.in_stock("province") {
        let solid_payload = held("gold") >= 1 && held("bandit") + held("bureaucrat") >= 1;
        if turn >= MIN_GREEN_TURN
            || provinces_left <= ENDGAME_PROVINCE_THRESHOLD + 2
            || score_gap >= BEHIND_DUCHY_DEFICIT
            || solid_payload
        {
            return Decision::Buy("province");
        }
    }

    if coins >= BUY_5_COST_COINS {
        if game.in_stock("bandit") && held("bandit") < 2 && cap > 0 {
            return Decision::Buy("bandit");
        }
        if let Some(pick) = buy_first_in_stock(ctx, &["laboratory", "market", "festival"]) {
            return pick;
        }
    }

    if coins >= BUY_4_COST_COINS {
        if game.in_stock("bureaucrat") && held("bureaucrat") < 2 && cap > -1 {
            return Decision::Buy("bureaucrat");
        }
        if game.in_stock("village") && cap <= 0 {
            return Decision::Buy("village");
        }
    }

    if coins >= BUY_SILVER_COINS {
        // One Chancellor early, a second later if terminals allow
        let want = if turn < 8 { 1 } else { 2 };
        if game.in_stock("chancellor") && held("chancellor") < want && cap > 0 {
            return Decision::Buy("chancellor");
        }
        if held("silver") < 2 && game.in_stock("silver") {
            return Decision::Buy("silver");
        }
    }

    if coins >= BUY_GOLD_COINS && game.in_stock("gold") {
        return Decision::Buy("gold");
    }

    if score_gap <= -BEHIND_DUCHY_DEFICIT && buys_exist {
        if coins >= BUY_4_COST_COINS && game.in_stock("gardens") {
            return Decision::Buy("gardens");
        }
        if coins >= BUY_5_COST_COINS {
            if let Some(pick) = buy_first_in_stock(ctx, &["market", "festival", "laboratory"]) {
                return pick;
            }
        }
    }

    if coins >= BUY_5_COST_COINS
        && game.in_stock("duchy")
        && (turn >= 16 || provinces_left <= MIDGAME_PROVINCE_THRESHOLD)
    {
        return Decision::Buy("duchy");
    }

    if coins >= BUY_5_COST_COINS {
        for card in ["laboratory", "market", "festival", "smithy"] {
            if card == "smithy" && cap <= 0 {
                continue;
            }
            if game.in_stock(card) {
                return Decision::Buy(card);
            }
        }
    }

    if coins >= BUY_4_COST_COINS {
        for card in ["village", "bureaucrat", "gardens", "remodel"] {
            if card == "bureaucrat" && held("bureaucrat") >= 3 {
                continue;
            }
            if card == "gardens" && !buys_exist && turn < MIN_GREEN_TURN {
                continue;
            }
            if game.in_stock(card) {
                return Decision::Buy(card);
            }
        }
    }

    if coins >= BUY_SILVER_COINS && game.in_stock("silver") {
        return Decision::Buy("silver");
    }

    if coins >= BUY_2_COST_COINS
        && game.in_stock("estate")
        && (turn >= 18 || provinces_left <= ENDGAME_PROVINCE_THRESHOLD)
    {
        return Decision::Buy("estate");
    }

    Decision::EndTurn
}
