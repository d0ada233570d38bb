//! Natural-language intent compiler for a lighting/appliance controller.
//!
//! Free-form English goes in; a small, ordered, deduplicated set of wire
//! commands (`CMD:LED=ON`, `CMD:COLOR=red`, ...) comes out. The pipeline is
//! normalize -> segment -> extract -> merge -> emit; one utterance can carry
//! several independent intents joined by connectives.

pub mod lexicon;

mod normalize;
pub use normalize::normalize;

mod segment;
pub use segment::segment;

mod slots;
pub use slots::{CommandSet, Device, RainMode, Slot, SlotKind, SpeedValue, Switch};

mod error;
pub use error::{CompileError, Diagnostic, Result};

mod extract;
pub use extract::{detect_mood, extract_clause, ClauseSlots};

mod merge;
pub use merge::Merger;

mod emit;
pub use emit::emit;

mod compiler;
pub use compiler::{Compilation, IntentCompiler};

/// Compile one utterance with a throwaway compiler. Callers that care about
/// color rotation across requests should keep an [`IntentCompiler`] around.
pub fn compile(text: &str) -> Result<Compilation> {
    IntentCompiler::new().compile(text)
}
