use samaki_types::{MarketInsight, StructuredInsight};
use serde_json::Value;

/// Normalize `market_insights` from the shapes the backend is known to
/// deliver: a plain object, a JSON-encoded string, a model-provider
/// envelope (`choices[0].message.content`), or free text.
///
/// Total over all inputs: parse failures degrade to the text fallback and
/// absence becomes `None`, so callers always have a renderable value.
pub fn normalize_market_insights(raw: &Value) -> Option<MarketInsight> {
    match raw {
        Value::Null => None,
        value if is_provider_envelope(value) => {
            let content = value
                .pointer("/choices/0/message/content")
                .and_then(Value::as_str)?;
            normalize_str(content)
        }
        Value::String(s) => normalize_str(s),
        Value::Object(map) => {
            Some(MarketInsight::Structured(object_to_insight(map.clone())))
        }
        other => Some(MarketInsight::text(other.to_string())),
    }
}

fn is_provider_envelope(value: &Value) -> bool {
    value
        .get("choices")
        .map(|choices| choices.is_array())
        .unwrap_or(false)
}

/// One level of unwrapping only: envelope content may itself be JSON text,
/// but a nested envelope inside that text is treated as a plain object.
fn normalize_str(s: &str) -> Option<MarketInsight> {
    if s.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Some(MarketInsight::Structured(object_to_insight(map))),
        _ => Some(MarketInsight::text(s)),
    }
}

// Field split cannot fail: a key lands in a known slot only when its value
// is a string, otherwise it stays in `extra` untouched.
fn object_to_insight(mut map: serde_json::Map<String, Value>) -> StructuredInsight {
    StructuredInsight {
        market_trend: take_text(&mut map, "market_trend"),
        competitor_analysis: take_text(&mut map, "competitor_analysis"),
        recommendation: take_text(&mut map, "recommendation"),
        extra: map,
    }
}

fn take_text(map: &mut serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_string_normalize_to_none() {
        assert_eq!(normalize_market_insights(&Value::Null), None);
        assert_eq!(normalize_market_insights(&json!("")), None);
    }

    #[test]
    fn plain_object_stays_structured() {
        let raw = json!({
            "market_trend": "rising",
            "competitor_analysis": "few sellers in Mwanza",
            "recommendation": "sell now"
        });
        match normalize_market_insights(&raw) {
            Some(MarketInsight::Structured(insight)) => {
                assert_eq!(insight.market_trend.as_deref(), Some("rising"));
                assert_eq!(insight.recommendation.as_deref(), Some("sell now"));
            }
            other => panic!("expected structured insight, got {:?}", other),
        }
    }

    #[test]
    fn json_string_round_trips_to_structured() {
        let original = json!({
            "market_trend": "stable",
            "demand_index": 4
        });
        let raw = json!(original.to_string());
        match normalize_market_insights(&raw) {
            Some(MarketInsight::Structured(insight)) => {
                assert_eq!(insight.market_trend.as_deref(), Some("stable"));
                assert_eq!(insight.extra["demand_index"], 4);
            }
            other => panic!("expected structured insight, got {:?}", other),
        }
    }

    #[test]
    fn non_json_string_becomes_text() {
        let raw = json!("prices look good this week");
        assert_eq!(
            normalize_market_insights(&raw),
            Some(MarketInsight::text("prices look good this week"))
        );
    }

    #[test]
    fn provider_envelope_is_unwrapped_one_level() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"market_trend\": \"falling\"}"
                }
            }]
        });
        match normalize_market_insights(&raw) {
            Some(MarketInsight::Structured(insight)) => {
                assert_eq!(insight.market_trend.as_deref(), Some("falling"));
            }
            other => panic!("expected structured insight, got {:?}", other),
        }
    }

    #[test]
    fn provider_envelope_with_plain_text_content() {
        let raw = json!({
            "choices": [{
                "message": { "content": "tilapia demand is up" }
            }]
        });
        assert_eq!(
            normalize_market_insights(&raw),
            Some(MarketInsight::text("tilapia demand is up"))
        );
    }

    #[test]
    fn envelope_with_empty_choices_normalizes_to_none() {
        let raw = json!({ "choices": [] });
        assert_eq!(normalize_market_insights(&raw), None);
    }

    #[test]
    fn scalars_and_arrays_coerce_to_text() {
        assert_eq!(
            normalize_market_insights(&json!(42)),
            Some(MarketInsight::text("42"))
        );
        assert_eq!(
            normalize_market_insights(&json!([1, 2])),
            Some(MarketInsight::text("[1,2]"))
        );
        assert_eq!(
            normalize_market_insights(&json!(true)),
            Some(MarketInsight::text("true"))
        );
    }

    #[test]
    fn deeply_nested_object_does_not_panic() {
        let raw = json!({
            "a": { "b": { "c": [{ "d": null }] } },
            "recommendation": "hold"
        });
        let normalized = normalize_market_insights(&raw).expect("renderable value");
        match normalized {
            MarketInsight::Structured(insight) => {
                assert_eq!(insight.recommendation.as_deref(), Some("hold"));
                assert!(insight.extra.contains_key("a"));
            }
            other => panic!("expected structured insight, got {:?}", other),
        }
    }
}
