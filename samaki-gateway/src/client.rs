use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::error::GatewayError;
use samaki_types::{
    AnalysisResponse, AuthResponse, BuyersResponse, CatchReport, CreditScoreResponse,
    HealthResponse, InsuranceQuoteResponse, LoanApplicationRequest, LoanApplicationResponse,
    LoginRequest, MatchRequest, MatchResponse, RegisterRequest, SellersResponse,
    UserCatchesResponse, UserMarketInsightsResponse, UserStatsResponse, UserTransactionsResponse,
};

/// Default backend when `SAMAKI_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_COVERAGE_TYPE: &str = "equipment";
const DEFAULT_COVERAGE_AMOUNT: f64 = 1_000_000.0;

/// Single point of contact with the SamakiCash backend.
///
/// Explicitly constructed and injected into callers; cheap to clone. Each
/// call is a single attempt with no retries. Callers that need cancellation
/// or deduplication track requests themselves.
#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl GatewayClient {
    /// Create a new gateway client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::invalid_request("base URL cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Network { source: e })?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Create a client from `SAMAKI_API_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            std::env::var("SAMAKI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- Auth ----

    /// Register a new account. At least one of email/phone is required;
    /// a request without either never reaches the network.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, GatewayError> {
        if !request.has_identity() {
            return Err(GatewayError::invalid_request(
                "either email or phone is required",
            ));
        }
        self.post_json("/api/auth/register", request).await
    }

    /// Log in with an email or phone identity.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, GatewayError> {
        if !request.has_identity() {
            return Err(GatewayError::invalid_request(
                "either email or phone is required",
            ));
        }
        self.post_json("/api/auth/login", request).await
    }

    // ---- Catch analysis ----

    /// Submit a catch for price analysis. `fish_type` and `location` must be
    /// non-empty and `quantity_kg` positive.
    pub async fn analyze_catch(
        &self,
        report: &CatchReport,
    ) -> Result<AnalysisResponse, GatewayError> {
        if report.fish_type.trim().is_empty() {
            return Err(GatewayError::invalid_request("fish_type is required"));
        }
        if report.quantity_kg <= 0.0 {
            return Err(GatewayError::invalid_request("quantity_kg must be positive"));
        }
        if report.location.trim().is_empty() {
            return Err(GatewayError::invalid_request("location is required"));
        }
        self.post_json("/api/analyze-catch", report).await
    }

    // ---- Credit & loans ----

    pub async fn get_credit_score(
        &self,
        user_id: &str,
    ) -> Result<CreditScoreResponse, GatewayError> {
        self.post_json("/api/credit-score", &json!({ "user_id": user_id }))
            .await
    }

    pub async fn apply_for_loan(
        &self,
        request: &LoanApplicationRequest,
    ) -> Result<LoanApplicationResponse, GatewayError> {
        self.post_json("/api/loan-application", request).await
    }

    // ---- Insurance ----

    /// Request an insurance quote. `coverage_type` defaults to "equipment"
    /// and `coverage_amount` to 1,000,000 when unset, matching the dashboard
    /// form defaults.
    pub async fn get_insurance_quote(
        &self,
        user_id: &str,
        coverage_amount: Option<f64>,
        coverage_type: Option<&str>,
    ) -> Result<InsuranceQuoteResponse, GatewayError> {
        let body = json!({
            "user_id": user_id,
            "coverage_amount": coverage_amount.unwrap_or(DEFAULT_COVERAGE_AMOUNT),
            "coverage_type": coverage_type.unwrap_or(DEFAULT_COVERAGE_TYPE),
        });
        self.post_json("/api/insurance-quote", &body).await
    }

    // ---- Matchmaking ----

    pub async fn find_matches(&self, request: &MatchRequest) -> Result<MatchResponse, GatewayError> {
        self.post_json("/api/match", request).await
    }

    // ---- Per-user data ----

    pub async fn get_user_stats(&self, user_id: &str) -> Result<UserStatsResponse, GatewayError> {
        self.get_json(&format!("/api/users/{}/stats", user_id)).await
    }

    pub async fn get_user_catches(
        &self,
        user_id: &str,
    ) -> Result<UserCatchesResponse, GatewayError> {
        self.get_json(&format!("/api/users/{}/catches", user_id))
            .await
    }

    pub async fn get_user_transactions(
        &self,
        user_id: &str,
    ) -> Result<UserTransactionsResponse, GatewayError> {
        self.get_json(&format!("/api/users/{}/transactions", user_id))
            .await
    }

    pub async fn get_user_market_insights(
        &self,
        user_id: &str,
    ) -> Result<UserMarketInsightsResponse, GatewayError> {
        self.get_json(&format!("/api/users/{}/market-insights", user_id))
            .await
    }

    pub async fn get_buyers(&self) -> Result<BuyersResponse, GatewayError> {
        self.get_json("/api/users/buyers").await
    }

    pub async fn get_sellers(&self) -> Result<SellersResponse, GatewayError> {
        self.get_json("/api/users/sellers").await
    }

    // ---- Misc ----

    pub async fn health_check(&self) -> Result<HealthResponse, GatewayError> {
        self.get_json("/").await
    }

    /// URL of a generated voice message. Pure string composition; no
    /// network call.
    pub fn audio_url(&self, filename: &str) -> String {
        format!("{}/audio/{}", self.base_url, filename)
    }

    // ---- Transport ----

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "gateway POST");
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network { source: e })?;
        Self::handle_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "gateway GET");
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::Network { source: e })?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| GatewayError::Network { source: e })?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body
            };
            tracing::warn!(status = status.as_u16(), %message, "gateway request failed");
            Err(GatewayError::api_error(status.as_u16(), message))
        }
    }
}

/// Base64-encode raw image bytes for [`CatchReport::image_data`].
pub fn encode_image_bytes(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
