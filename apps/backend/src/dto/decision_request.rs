use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    #[serde(default)]
    pub hand: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardNameAndHand {
    pub card_name: String,
    #[serde(default)]
    pub hand: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PossibleCards {
    pub possible_cards: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyCardsInHand {
    pub money_in_hand: Vec<String>,
}
