use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Credit Scoring & Loans ============

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreditScoreResponse {
    pub user_id: String,
    pub credit_score: u32,
    pub loan_eligible: bool,
    pub max_loan_amount: f64,
    pub catch_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_components: Option<ScoreComponents>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreComponents {
    pub base_score: u32,
    pub activity_bonus: u32,
    pub total_catches: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoanApplicationRequest {
    pub user_id: String,
    pub amount: f64,
    pub purpose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoanApplicationResponse {
    pub status: String,
    pub user_id: String,
    pub amount: f64,
    pub purpose: String,
    pub credit_score: u32,
    pub message: String,
}
