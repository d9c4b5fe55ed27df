pub mod auth;
pub mod catch;
pub mod chat;
pub mod credit;
pub mod insights;
pub mod insurance;
pub mod market;
pub mod users;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use catch::{AnalysisResponse, CatchReport, ImageAnalysis, PriceAnalysis};
pub use chat::{ChatMessage, ChatRequest, ChatRole, MessagePart};
pub use credit::{
    CreditScoreResponse, LoanApplicationRequest, LoanApplicationResponse, ScoreComponents,
};
pub use insights::{MarketInsight, StructuredInsight};
pub use insurance::InsuranceQuoteResponse;
pub use market::{BuyerMatch, MatchRequest, MatchResponse};
pub use users::{
    BuyersResponse, HealthResponse, SellersResponse, UserCatchesResponse,
    UserMarketInsightsResponse, UserStatsResponse, UserTransactionsResponse,
};
