//! llm-fallback: optional language-model oracle for unmatched utterances
//!
//! When rule extraction yields no intent, the caller may hand the normalized
//! text to an oracle that returns a JSON object keyed by slot names. Models
//! produce sloppy JSON, so the response goes through a lenient repair
//! pipeline; anything that still does not parse is "no result" and the
//! caller falls back to pure rule behavior.

mod types;
pub use types::{FallbackIntent, RelayField, SpeedField};

mod error;
pub use error::{FallbackError, Result};

mod json;
pub use json::extract_intent;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockOracle;

#[cfg(feature = "ollama")]
mod client;
#[cfg(feature = "ollama")]
pub use client::OllamaClient;

/// An external model that maps normalized text to slot values.
pub trait IntentOracle {
    fn infer(&self, text: &str) -> Result<FallbackIntent>;
}
