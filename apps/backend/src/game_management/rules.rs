//! Game rules module
//!
//! This module contains the pure action validation rules. It depends only
//! on in-memory domain types and std, so it can be called from any number
//! of handlers concurrently.

use std::fmt;
use std::str::FromStr;

use crate::dto::play_response::PlayResponse;

/// Message returned for any label outside the allow-list.
pub const INVALID_ACTION_MESSAGE: &str = "Invalid action";

/// Actions a player may announce for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Buy,
    Trash,
    End,
    Play,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Buy, Action::Trash, Action::End, Action::Play];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Trash => "trash",
            Action::End => "end",
            Action::Play => "play",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction;

impl FromStr for Action {
    type Err = UnknownAction;

    /// Exact, case-sensitive match against the allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Action::Buy),
            "trash" => Ok(Action::Trash),
            "end" => Ok(Action::End),
            "play" => Ok(Action::Play),
            _ => Err(UnknownAction),
        }
    }
}

/// Classify an action label for a player.
///
/// The player id is accepted as-is. Invalid labels are not echoed back.
pub fn validate_action(_player_id: &str, action: &str) -> PlayResponse {
    match action.parse::<Action>() {
        Ok(action) => PlayResponse {
            valid: true,
            message: format!("Action {action} accepted"),
        },
        Err(UnknownAction) => PlayResponse {
            valid: false,
            message: INVALID_ACTION_MESSAGE.to_string(),
        },
    }
}
