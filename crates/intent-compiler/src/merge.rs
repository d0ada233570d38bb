//! Clause merging and the color-rotation memory.

use crate::extract::ClauseSlots;
use crate::lexicon;
use crate::slots::{CommandSet, Device, Slot, SlotKind, Switch};
use rand::seq::SliceRandom;
use std::sync::Mutex;
use tracing::debug;

/// Combines per-clause extraction results into one command set.
///
/// The merger owns the only piece of cross-call state in the compiler: the
/// last randomly picked color, guarded so no compile observes a half-updated
/// value. Extractors never see it; they only flag that a rotation was asked
/// for.
#[derive(Debug, Default)]
pub struct Merger {
    last_random_color: Mutex<Option<&'static str>>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge clause results left to right. Later clauses overwrite earlier
    /// same-kind slots; device states are keyed per device so a combo like
    /// "turn on fan and turn off led" keeps both. The whole-utterance mood,
    /// if any, is merged in first.
    pub fn merge(
        &self,
        mood: Option<(&'static str, &'static str)>,
        clauses: &[ClauseSlots],
    ) -> CommandSet {
        let mut set = CommandSet::new();
        if let Some((primary, sub)) = mood {
            set.insert(Slot::Mood { primary, sub });
        }
        for clause in clauses {
            for slot in &clause.slots {
                set.insert(slot.clone());
            }
            if clause.wants_color_rotation && !clause.has(SlotKind::Color) {
                let color = self.rotate_color();
                debug!(color, "rotation request resolved");
                set.insert(Slot::Color(color));
            }
        }
        // A bare LED-count request implies the strip should be running.
        if set.contains(SlotKind::NumLeds)
            && !set.contains(SlotKind::LedState)
            && ![SlotKind::Effect, SlotKind::Color, SlotKind::Brightness, SlotKind::Speed, SlotKind::LcdText]
                .iter()
                .any(|k| set.contains(*k))
        {
            set.insert(Slot::DeviceState { device: Device::Led, state: Switch::On });
        }
        set
    }

    /// Pick a color from the rotation palette, excluding the white family
    /// and the previous pick; falls back to the full rotation palette when
    /// the exclusions would empty it.
    fn rotate_color(&self) -> &'static str {
        let mut last = match self.last_random_color.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut candidates: Vec<&'static str> = lexicon::SUPPORTED_COLORS
            .iter()
            .filter(|c| !lexicon::ROTATION_EXCLUDED_COLORS.contains(c))
            .copied()
            .collect();
        if let Some(prev) = *last {
            candidates.retain(|c| *c != prev);
            if candidates.is_empty() {
                candidates = lexicon::SUPPORTED_COLORS
                    .iter()
                    .filter(|c| !lexicon::ROTATION_EXCLUDED_COLORS.contains(c))
                    .copied()
                    .collect();
            }
        }
        let pick = candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("red");
        *last = Some(pick);
        pick
    }
}
