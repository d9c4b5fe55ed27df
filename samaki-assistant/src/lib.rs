//! # Samaki Assistant
//!
//! The SamakiCash support assistant engine: a streaming chat turn loop
//! with bounded tool-calling, a fixed persona prompt, and a Mistral model
//! binding. The UI consumes one [`engine::TurnEvent`] stream per user turn.
//!
//! ## Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use samaki_assistant::{engine::AssistantEngine, mistral::MistralClient};
//! use samaki_types::ChatMessage;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = MistralClient::new(std::env::var("MISTRAL_API_KEY")?)?;
//!     let engine = AssistantEngine::new(Arc::new(model));
//!
//!     let mut events = engine.run_turn(vec![ChatMessage::user("How do loans work?")]);
//!     while let Some(event) = events.next().await {
//!         println!("{:?}", event);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod engine;
pub mod error;
pub mod mistral;
pub mod prompt;
pub mod tools;
pub mod types;

pub use client::ChatModel;
pub use engine::{AssistantEngine, Transcript, TurnEvent, DEFAULT_MAX_STEPS};
pub use error::AssistantError;
