//! # Samaki Gateway
//!
//! Typed client for the SamakiCash backend API: auth, catch analysis,
//! credit scoring, insurance quoting, matchmaking, loans, and per-user
//! aggregates. Backend responses with unstable shapes (`market_insights`)
//! are normalized into a closed set of variants before they reach the UI.
//!
//! ## Example
//!
//! ```rust,no_run
//! use samaki_gateway::{insights::normalize_market_insights, GatewayClient};
//! use samaki_types::CatchReport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GatewayClient::from_env()?;
//!     let analysis = client
//!         .analyze_catch(&CatchReport {
//!             fish_type: "tilapia".into(),
//!             quantity_kg: 25.0,
//!             location: "Mwanza".into(),
//!             user_id: "user-1".into(),
//!             image_data: None,
//!         })
//!         .await?;
//!
//!     println!("{}", analysis.price_analysis.price_per_kg());
//!     if let Some(insight) = normalize_market_insights(&analysis.market_insights) {
//!         println!("{:?}", insight);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod insights;

pub use client::{encode_image_bytes, GatewayClient, DEFAULT_BASE_URL};
pub use error::GatewayError;
