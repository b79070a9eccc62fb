use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub player_id: String,
    pub action: String,
}
