//! Decision engine for the bot protocol
//!
//! Pure functions over the game snapshot the server sends and our own
//! per-game [`state::TurnState`]; no I/O happens here.

pub mod actions;
pub mod buys;
pub mod cards;
pub mod helpers;
pub mod pipeline;
pub mod state;
pub mod strategies;
pub mod turn;

use std::fmt;

pub use state::{TurnRegistry, TurnState};
pub use strategies::StrategyKind;
pub use turn::decide_play;

/// What we answer to `/play`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Action(&'static str),
    Buy(&'static str),
    EndTurn,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Action(card) => write!(f, "ACTION {card}"),
            Decision::Buy(card) => write!(f, "BUY {card}"),
            Decision::EndTurn => f.write_str("END_TURN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(Decision::Action("village").to_string(), "ACTION village");
        assert_eq!(Decision::Buy("province").to_string(), "BUY province");
        assert_eq!(Decision::EndTurn.to_string(), "END_TURN");
    }
}
