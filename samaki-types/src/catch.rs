use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Catch Analysis ============

/// A fisher's catch submission sent to `/api/analyze-catch`.
///
/// `image_data`, when present, is base64-encoded raw image bytes. The
/// content is never inspected at this layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatchReport {
    pub fish_type: String,
    pub quantity_kg: f64,
    pub location: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

/// The backend's pricing and market verdict for a catch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub status: String,
    pub price_analysis: PriceAnalysis,
    /// Raw insight payload; shape varies by backend path. Normalize with
    /// `samaki_gateway::insights::normalize_market_insights` before rendering.
    #[serde(default)]
    #[ts(type = "any")]
    pub market_insights: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<ImageAnalysis>,
    #[serde(default)]
    pub voice_message_url: Option<String>,
    #[serde(default)]
    pub analysis_summary: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Fair-price verdict. `confidence_score` is a fraction in [0, 1];
/// `fair_price` is non-negative.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceAnalysis {
    pub fair_price: f64,
    pub currency: String,
    #[serde(default)]
    pub reasoning: String,
    pub confidence_score: f64,
}

/// Optional photo quality assessment returned alongside the price verdict.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageAnalysis {
    pub quality_assessment: String,
    pub freshness: String,
    pub confidence: f64,
}

impl PriceAnalysis {
    /// Price line as the dashboard renders it, e.g. "4500 TZS/kg".
    pub fn price_per_kg(&self) -> String {
        format!("{} {}/kg", self.fair_price, self.currency)
    }

    /// Confidence badge as the dashboard renders it, e.g. "92% Confidence".
    pub fn confidence_label(&self) -> String {
        format!("{}% Confidence", (self.confidence_score * 100.0).round())
    }
}
