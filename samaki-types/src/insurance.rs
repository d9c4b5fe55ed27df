use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Insurance ============

/// Insurance quote. Older backend builds key the premium as
/// `premium_amount`; both spellings deserialize into `annual_premium`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsuranceQuoteResponse {
    pub user_id: String,
    pub coverage_type: String,
    pub coverage_amount: f64,
    #[serde(alias = "premium_amount")]
    pub annual_premium: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub quote_valid_until: Option<String>,
}
