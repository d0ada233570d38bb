//! Scripted oracle for tests and offline development.

use crate::error::{FallbackError, Result};
use crate::types::FallbackIntent;
use crate::IntentOracle;
use std::sync::Mutex;

/// Returns a fixed queue of responses and records what it was asked.
#[derive(Debug, Default)]
pub struct MockOracle {
    responses: Mutex<Vec<FallbackIntent>>,
    asked: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; responses are served oldest first.
    pub fn push_response(&self, intent: FallbackIntent) {
        let mut responses = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        responses.push(intent);
    }

    /// Every text this oracle has been asked to interpret, in order.
    pub fn asked(&self) -> Vec<String> {
        match self.asked.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl IntentOracle for MockOracle {
    fn infer(&self, text: &str) -> Result<FallbackIntent> {
        let mut asked = match self.asked.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        asked.push(text.to_string());
        drop(asked);

        let mut responses = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if responses.is_empty() {
            return Err(FallbackError::NoResult);
        }
        Ok(responses.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_queued_responses_in_order() {
        let oracle = MockOracle::new();
        oracle.push_response(FallbackIntent { color: Some("red".into()), ..Default::default() });
        oracle.push_response(FallbackIntent { stop: Some(true), ..Default::default() });

        let first = oracle.infer("make it red").unwrap();
        assert_eq!(first.color.as_deref(), Some("red"));
        let second = oracle.infer("enough").unwrap();
        assert_eq!(second.stop, Some(true));
        assert!(matches!(oracle.infer("anything"), Err(FallbackError::NoResult)));

        assert_eq!(oracle.asked(), vec!["make it red", "enough", "anything"]);
    }
}
