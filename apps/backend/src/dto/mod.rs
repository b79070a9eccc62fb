pub mod decision_request;
pub mod decision_response;
pub mod game_snapshot;
pub mod meta;
pub mod play_request;
pub mod play_response;
