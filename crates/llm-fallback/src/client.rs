//! Ollama-backed oracle. Blocking HTTP against a local Ollama server.

use crate::error::{FallbackError, Result};
use crate::json::extract_intent;
use crate::types::FallbackIntent;
use crate::IntentOracle;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama3.2";

const PROMPT_PREAMBLE: &str = "You control a smart LED strip and two relay switches. \
Reply with one JSON object only, no prose. Allowed keys: led (\"on\"/\"off\"), \
relay ({\"target\": \"light\"|\"fan\", \"state\": \"on\"|\"off\"}), color, effect, \
mood (\"primary:sub\"), rain (light/medium/heavy/thunderstorm), brightness (0-100), \
speed (1-1000 or \"default\"), numleds, ledindex, ledrange (\"start,end\"), \
stop (true/false), lcd (short text). Omit keys you are not sure about.\n\nUser request: ";

pub struct OllamaClient {
    endpoint: String,
    model: String,
    http: Client,
}

impl OllamaClient {
    /// Connect to a local Ollama instance. `OLLAMA_URL` and `OLLAMA_MODEL`
    /// override the defaults.
    pub fn new() -> Result<Self> {
        let endpoint =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::with_endpoint(endpoint, model)
    }

    pub fn with_endpoint(endpoint: String, model: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FallbackError::Http(e.to_string()))?;
        Ok(Self { endpoint, model, http })
    }
}

impl IntentOracle for OllamaClient {
    fn infer(&self, text: &str) -> Result<FallbackIntent> {
        let prompt = format!("{PROMPT_PREAMBLE}{text}");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))
            .send()
            .map_err(|e| FallbackError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FallbackError::Http(format!("status {}", resp.status())));
        }

        let body: serde_json::Value =
            resp.json().map_err(|e| FallbackError::Http(e.to_string()))?;
        let answer = body.get("response").and_then(|v| v.as_str()).unwrap_or("");
        debug!(answer, "model response");

        extract_intent(answer).ok_or(FallbackError::NoResult)
    }
}
