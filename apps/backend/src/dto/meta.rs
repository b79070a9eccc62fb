use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub docs: String,
    pub health: String,
}

/// One entry of the route catalog served at `/docs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDoc {
    pub method: String,
    pub path: String,
    pub summary: String,
    pub requires_game_id: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocs {
    pub name: String,
    pub routes: Vec<RouteDoc>,
}
