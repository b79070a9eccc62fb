use serde::{Deserialize, Serialize};

/// Envelope every bot-protocol endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse<T> {
    pub game_id: String,
    pub decision: T,
}

impl<T> DecisionResponse<T> {
    pub fn new(game_id: impl Into<String>, decision: T) -> Self {
        Self {
            game_id: game_id.into(),
            decision,
        }
    }
}
