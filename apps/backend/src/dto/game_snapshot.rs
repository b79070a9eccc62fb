use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Game state pushed by the game server on every `/play` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub players: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub stock: CardCounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub hand: Option<CardCounts>, // Only present for the player whose turn it is
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounts {
    #[serde(default)]
    pub quantities: HashMap<String, u32>,
}

impl CardCounts {
    pub fn get(&self, card: &str) -> u32 {
        self.quantities.get(card).copied().unwrap_or(0)
    }
}

impl<const N: usize> From<[(&str, u32); N]> for CardCounts {
    fn from(entries: [(&str, u32); N]) -> Self {
        Self {
            quantities: entries
                .into_iter()
                .map(|(card, count)| (card.to_string(), count))
                .collect(),
        }
    }
}

impl GameSnapshot {
    /// Supply pile size for a card, zero when the pile is absent.
    pub fn stock_of(&self, card: &str) -> u32 {
        self.stock.get(card)
    }

    pub fn in_stock(&self, card: &str) -> bool {
        self.stock_of(card) > 0
    }
}
