pub mod client;
pub mod types;

pub use client::MistralClient;

/// Provider name
pub const MISTRAL: &str = "mistral";

/// Default model id
pub const MISTRAL_LARGE_ID: &str = "mistral-large-latest";
