//! Card tables and tuning thresholds
//!
//! Pure constants and lookups keyed by the lowercase card names the game
//! server uses on the wire.

/// Coins needed for each buy tier
pub const BUY_PROVINCE_COINS: u32 = 8;
pub const BUY_GOLD_COINS: u32 = 6;
pub const BUY_5_COST_COINS: u32 = 5;
pub const BUY_4_COST_COINS: u32 = 4;
pub const BUY_SILVER_COINS: u32 = 3;
pub const BUY_2_COST_COINS: u32 = 2;

/// Provinces left when we switch to endgame greening
pub const ENDGAME_PROVINCE_THRESHOLD: u32 = 2;

/// Provinces left when midgame greening pressure starts
pub const MIDGAME_PROVINCE_THRESHOLD: u32 = 4;

/// Turn after which anything with victory points is worth buying
pub const RUSH_TURN: u32 = 145;

/// Earliest turn we green without a ready engine
pub const MIN_GREEN_TURN: u32 = 14;

/// Before this turn we hold at most PROVINCES_ALLOWED_BEFORE_CAP provinces
pub const PROVINCE_SOFT_CAP_BEFORE_TURN: u32 = 20;
pub const PROVINCES_ALLOWED_BEFORE_CAP: u32 = 2;

pub const MAX_LABS: u32 = 3;
pub const MAX_SMITHIES: u32 = 2;

/// Engine readiness thresholds
pub const ENGINE_GOLD_THRESHOLD: u32 = 2;
pub const ENGINE_LAB_THRESHOLD: u32 = 2;
pub const ENGINE_MF_SUM_THRESHOLD: u32 = 2;

/// Coppers in hand that make a chapel play worthwhile
pub const MIN_COPPER_TRASH: u32 = 2;

/// Last turn that counts as the opening
pub const OPENING_TURN_LIMIT: u32 = 3;

/// Trailing by this many points pushes us toward duchies
pub const BEHIND_DUCHY_DEFICIT: i32 = 6;

/// Provinces left at which early provinces are always fine
pub const EARLY_PROVINCE_STOCK: u32 = 6;

/// Last turn a first hireling is still worth it
pub const EARLY_HIRELING_TURN: u32 = 10;

/// Minimum provinces left to consider a gardens plan
pub const GARDENS_PIVOT_MIN_PROVINCES: u32 = 10;

pub const FIVE_COST_PREFER: [&str; 3] = ["laboratory", "market", "festival"];

/// Cards whose only purpose is victory points or money
pub const NON_ACTION_CARDS: [&str; 6] = ["copper", "silver", "gold", "estate", "duchy", "province"];

/// Cards we trash or discard first
pub const JUNK: [&str; 2] = ["estate", "curse"];

/// Stock piles shown first in compact game logs
pub const STOCK_PREVIEW_ORDER: [&str; 12] = [
    "copper",
    "silver",
    "gold",
    "estate",
    "duchy",
    "province",
    "village",
    "market",
    "laboratory",
    "festival",
    "smithy",
    "woodcutter",
];

/// Purchase cost of a card, None for cards we know nothing about.
pub fn cost(card: &str) -> Option<u32> {
    let coins = match card {
        "province" => 8,
        "duchy" => 5,
        "estate" => 2,
        "gold" => 6,
        "silver" => 3,
        "copper" => 0,
        "laboratory" | "market" | "festival" => 5,
        "village" | "woodcutter" | "workshop" => 3,
        "smithy" | "port" | "poacher" | "farmingvillage" => 4,
        "cellar" | "chapel" => 2,
        "gardens" => 4,
        "moneylender" | "remodel" | "remake" | "feast" | "militia" | "bureaucrat" => 4,
        "mine" | "witch" | "bandit" => 5,
        "councilroom" | "library" => 5,
        "magpie" => 4,
        "adventurer" | "hireling" | "distantshore" | "marquis" => 6,
        _ => return None,
    };
    Some(coins)
}

/// Coins gained by playing an action card.
pub fn coin_bonus(card: &str) -> u32 {
    match card {
        "market" | "poacher" => 1,
        "festival" | "woodcutter" | "chancellor" | "farmingvillage" => 2,
        "moneylender" => 3, // only when it trashes a copper
        _ => 0,
    }
}

/// Extra actions granted by playing an action card.
pub fn plus_actions(card: &str) -> u32 {
    match card {
        "village" | "festival" | "port" | "farmingvillage" => 2,
        "market" | "laboratory" | "cellar" | "distantshore" | "magpie" | "poacher" => 1,
        _ => 0,
    }
}

/// Extra buys granted by playing an action card.
pub fn buy_bonus(card: &str) -> u32 {
    match card {
        "market" | "woodcutter" | "festival" | "councilroom" => 1,
        _ => 0,
    }
}

/// Coins a treasure card is worth in hand.
pub fn treasure_value(card: &str) -> u32 {
    match card {
        "copper" => 1,
        "silver" => 2,
        "gold" => 3,
        _ => 0,
    }
}

/// Rough desirability used to rank cards; higher is better.
pub fn priority(card: &str) -> u32 {
    match card {
        "province" => 100,
        "gold" => 80,
        "laboratory" => 70,
        "market" => 62,
        "festival" => 58,
        "smithy" => 55,
        "village" => 40,
        "duchy" => 35,
        "gardens" => 32,
        "silver" => 30,
        "estate" => 10,
        "copper" => 5,
        _ => 0,
    }
}

/// Whether a card can be played during the action phase.
pub fn is_action(card: &str) -> bool {
    cost(card).is_some() && !NON_ACTION_CARDS.contains(&card)
}

pub fn is_junk(card: &str) -> bool {
    JUNK.contains(&card)
}
