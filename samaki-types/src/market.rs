use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Buyer/Seller Matchmaking ============

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchRequest {
    pub fish_type: String,
    pub quantity_kg: f64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResponse {
    #[serde(default)]
    pub status: String,
    pub matches: Vec<BuyerMatch>,
    #[serde(default)]
    #[ts(type = "any")]
    pub price_analysis: serde_json::Value,
    #[serde(default)]
    #[ts(type = "any")]
    pub market_insights: serde_json::Value,
    #[serde(default)]
    pub analysis_summary: String,
}

/// One matched buyer with score and estimated value. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BuyerMatch {
    pub buyer_id: String,
    pub buyer_contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_location: Option<String>,
    pub match_score: f64,
    pub estimated_price_per_kg: f64,
    pub estimated_total_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
