//! The compile pipeline: normalize, segment, extract, merge, emit.

use crate::emit::emit;
use crate::error::{CompileError, Diagnostic, Result};
use crate::extract::{detect_mood, extract_clause};
use crate::merge::Merger;
use crate::normalize::normalize;
use crate::segment::segment;
use tracing::{debug, warn};

/// Output of one compile call.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Wire command lines, ordered and deduplicated.
    pub commands: Vec<String>,
    /// Non-fatal findings recorded along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns one free-form utterance into wire commands.
///
/// Stateless per call except for the merger's last-random-color memory;
/// safe to share across threads.
#[derive(Debug, Default)]
pub struct IntentCompiler {
    merger: Merger,
}

impl IntentCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile one utterance. A sentence with nothing recognizable yields
    /// `CompileError::NoIntentFound`; everything else is reported through
    /// diagnostics while the compile continues.
    pub fn compile(&self, text: &str) -> Result<Compilation> {
        let normalized = normalize(text);
        debug!(raw = text, %normalized, "normalized utterance");

        // Mood runs over the whole utterance before segmentation, so a mood
        // phrase split across clause boundaries is still caught.
        let mood = detect_mood(&normalized);

        let clauses = segment(&normalized);
        debug!(count = clauses.len(), "segmented clauses");

        let mut diagnostics = Vec::new();
        let results: Vec<_> = clauses
            .iter()
            .map(|clause| extract_clause(clause, &mut diagnostics))
            .collect();

        for diag in &diagnostics {
            warn!(%diag, "extraction diagnostic");
        }

        let set = self.merger.merge(mood, &results);
        if set.is_empty() {
            return Err(CompileError::NoIntentFound);
        }

        let commands = emit(&set, &mut diagnostics);
        if commands.is_empty() {
            // every slot failed final validation
            return Err(CompileError::NoIntentFound);
        }
        debug!(count = commands.len(), "emitted commands");
        Ok(Compilation { commands, diagnostics })
    }
}
