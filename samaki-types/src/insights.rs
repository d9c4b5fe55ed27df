use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Market Insights ============

/// Normalized market insight. The backend delivers `market_insights` in
/// several shapes (plain object, JSON-encoded string, model-provider
/// envelope, free text); normalization collapses them into this closed set
/// so every call site can match exhaustively. Absence is `Option::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketInsight {
    Structured(StructuredInsight),
    Text { text: String },
}

/// Structured insight with the fields the dashboard knows how to render.
/// Unrecognized fields are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StructuredInsight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MarketInsight {
    /// Free-text variant constructor.
    pub fn text<S: Into<String>>(text: S) -> Self {
        MarketInsight::Text { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_insight_preserves_unknown_fields() {
        let json = serde_json::json!({
            "market_trend": "rising",
            "demand_index": 7
        });
        let parsed: StructuredInsight = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.market_trend.as_deref(), Some("rising"));
        assert_eq!(parsed.extra["demand_index"], 7);
    }

    #[test]
    fn market_insight_is_tagged() {
        let insight = MarketInsight::text("prices steady this week");
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["text"], "prices steady this week");
    }
}
