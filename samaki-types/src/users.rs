use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Per-user Aggregates ============

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserStatsResponse {
    pub total_catches: u32,
    pub total_quantity_kg: f64,
    pub average_price_per_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserCatchesResponse {
    pub count: u32,
    #[ts(type = "any[]")]
    pub catches: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserTransactionsResponse {
    pub count: u32,
    #[ts(type = "any[]")]
    pub transactions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserMarketInsightsResponse {
    pub top_fish_types: Vec<(String, u32)>,
    pub insight: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BuyersResponse {
    pub count: u32,
    #[ts(type = "any[]")]
    pub buyers: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellersResponse {
    pub count: u32,
    #[ts(type = "any[]")]
    pub sellers: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
