//! Rendering resolved slots into wire command lines.

use crate::error::Diagnostic;
use crate::lexicon;
use crate::slots::{CommandSet, Device, Slot, SlotKind, SpeedValue, Switch};
use std::collections::HashSet;
use tracing::warn;

/// Emission priority: device/LED state, color, effect, relay switches, then
/// everything else in extraction order.
fn rank(kind: SlotKind) -> u8 {
    match kind {
        SlotKind::LedState => 0,
        SlotKind::Color => 1,
        SlotKind::Effect => 2,
        SlotKind::RelayLight | SlotKind::RelayFan => 3,
        _ => 4,
    }
}

/// Render a command set into wire lines.
///
/// One slot may expand to several lines (most commands carry an LCD
/// companion line). Every slot re-validates its invariant right before
/// formatting and is skipped with a diagnostic instead of producing a
/// malformed command. Exact duplicate lines keep their first occurrence.
pub fn emit(set: &CommandSet, diags: &mut Vec<Diagnostic>) -> Vec<String> {
    let mut ordered: Vec<&Slot> = set.iter().collect();
    ordered.sort_by_key(|s| rank(s.kind()));

    let mut lines = Vec::new();
    for slot in ordered {
        emit_slot(slot, &mut lines, diags);
    }

    let mut seen = HashSet::new();
    lines.retain(|l| seen.insert(l.clone()));
    lines
}

fn emit_slot(slot: &Slot, lines: &mut Vec<String>, diags: &mut Vec<Diagnostic>) {
    match slot {
        Slot::DeviceState { device: Device::Led, state } => {
            let state = match state {
                Switch::On => "ON",
                Switch::Off => "OFF",
            };
            lines.push(format!("CMD:LED={state}"));
        }
        Slot::DeviceState { device, state } => {
            lines.push(format!("CMD:RELAYSWITCH={}={}", device.as_str(), state.as_str()));
            lines.push(format!(
                "CMD:LCD={}: {}",
                title(device.as_str()),
                state.as_str().to_uppercase()
            ));
        }
        Slot::Color(name) => {
            if lexicon::canonical_color(name).is_none() {
                skip(diags, Diagnostic::UnsupportedName { slot: "color", name: name.to_string() });
                return;
            }
            lines.push(format!("CMD:COLOR={name}"));
            lines.push(format!("CMD:LCD=Color: {}", title(name)));
        }
        Slot::Effect(name) => {
            if lexicon::canonical_effect(name).is_none() {
                skip(diags, Diagnostic::UnsupportedName { slot: "effect", name: name.to_string() });
                return;
            }
            // The controller wants a clean strip before an animation starts.
            lines.push("CMD:STOP".to_string());
            lines.push("CMD:LED=OFF".to_string());
            lines.push(format!("CMD:EFFECT={name}"));
            lines.push(format!("CMD:LCD=Effect: {}", title(&name.replace('_', " "))));
        }
        Slot::Mood { primary, sub } => {
            lines.push(format!("CMD:MOOD={primary}:{sub}"));
        }
        Slot::Rain(mode) => {
            lines.push(format!("CMD:RAIN={}", mode.as_str()));
            lines.push(format!("CMD:LCD=Rain: {}", title(mode.as_str())));
        }
        Slot::Speed(SpeedValue::Default) => {
            lines.push("CMD:SPEED=DEFAULT".to_string());
            lines.push("CMD:LCD=Speed: DEFAULT".to_string());
        }
        Slot::Speed(SpeedValue::Exact(v)) => {
            if !(1..=1000).contains(v) {
                skip(
                    diags,
                    Diagnostic::OutOfRange { slot: "speed", value: i64::from(*v), min: 1, max: 1000 },
                );
                return;
            }
            lines.push(format!("CMD:SPEED={v}"));
            lines.push(format!("CMD:LCD=Speed: {v}"));
        }
        Slot::Brightness(v) => {
            if *v > 100 {
                skip(
                    diags,
                    Diagnostic::OutOfRange {
                        slot: "brightness",
                        value: i64::from(*v),
                        min: 0,
                        max: 100,
                    },
                );
                return;
            }
            lines.push(format!("CMD:BRIGHTNESS={v}"));
            lines.push(format!("CMD:LCD=Brightness: {v}%"));
        }
        Slot::NumLeds(v) => {
            if !(1..=300).contains(v) {
                skip(
                    diags,
                    Diagnostic::OutOfRange { slot: "led count", value: i64::from(*v), min: 1, max: 300 },
                );
                return;
            }
            lines.push(format!("CMD:NUMLEDS={v}"));
            lines.push(format!("CMD:LCD=LEDs Active: {v}"));
        }
        Slot::LedIndex(v) => {
            if *v > 299 {
                skip(
                    diags,
                    Diagnostic::OutOfRange { slot: "led index", value: i64::from(*v), min: 0, max: 299 },
                );
                return;
            }
            lines.push(format!("CMD:LEDINDEX={v}"));
            lines.push(format!("CMD:LCD=LED #{v} is ON"));
        }
        Slot::LedRange { start, end } => {
            if !(start < end && *end <= 299) {
                skip(
                    diags,
                    Diagnostic::InvalidRange { start: i64::from(*start), end: i64::from(*end) },
                );
                return;
            }
            lines.push(format!("CMD:LEDRANGE={start},{end}"));
            lines.push(format!("CMD:LCD=Range: {start}-{end}"));
        }
        Slot::Stop => {
            lines.push("CMD:STOP".to_string());
            lines.push("CMD:LCD=Effects stopped".to_string());
        }
        Slot::LcdText(text) => {
            lines.push(format!("CMD:LCD={text}"));
        }
    }
}

fn skip(diags: &mut Vec<Diagnostic>, diag: Diagnostic) {
    warn!(%diag, "slot failed final validation, not emitted");
    diags.push(diag);
}

/// ASCII title case, word by word.
fn title(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::RainMode;

    fn emit_slots(slots: Vec<Slot>) -> (Vec<String>, Vec<Diagnostic>) {
        let set: CommandSet = slots.into_iter().collect();
        let mut diags = Vec::new();
        let lines = emit(&set, &mut diags);
        (lines, diags)
    }

    #[test]
    fn priority_order() {
        let (lines, _) = emit_slots(vec![
            Slot::Rain(RainMode::Heavy),
            Slot::DeviceState { device: Device::Fan, state: Switch::On },
            Slot::Effect("pulse"),
            Slot::Color("red"),
            Slot::DeviceState { device: Device::Led, state: Switch::On },
        ]);
        assert_eq!(lines[0], "CMD:LED=ON");
        assert_eq!(lines[1], "CMD:COLOR=red");
        // effect preamble, then the effect itself
        assert_eq!(lines[3], "CMD:STOP");
        assert!(lines.contains(&"CMD:EFFECT=pulse".to_string()));
        let fan = lines.iter().position(|l| l == "CMD:RELAYSWITCH=fan=on");
        let rain = lines.iter().position(|l| l == "CMD:RAIN=heavy");
        assert!(fan < rain);
    }

    #[test]
    fn color_expands_to_two_lines() {
        let (lines, _) = emit_slots(vec![Slot::Color("sky blue")]);
        assert_eq!(lines, vec!["CMD:COLOR=sky blue", "CMD:LCD=Color: Sky Blue"]);
    }

    #[test]
    fn relay_carries_lcd_companion() {
        let (lines, _) = emit_slots(vec![Slot::DeviceState {
            device: Device::Light,
            state: Switch::Off,
        }]);
        assert_eq!(lines, vec!["CMD:RELAYSWITCH=light=off", "CMD:LCD=Light: OFF"]);
    }

    #[test]
    fn out_of_range_slot_is_skipped_with_diagnostic() {
        let (lines, diags) = emit_slots(vec![Slot::Speed(SpeedValue::Exact(0))]);
        assert!(lines.is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::OutOfRange { slot: "speed", value: 0, min: 1, max: 1000 }]
        );
    }

    #[test]
    fn invalid_range_is_skipped() {
        let (lines, diags) = emit_slots(vec![Slot::LedRange { start: 10, end: 10 }]);
        assert!(lines.is_empty());
        assert_eq!(diags, vec![Diagnostic::InvalidRange { start: 10, end: 10 }]);
    }

    #[test]
    fn unknown_color_is_skipped() {
        let (lines, diags) = emit_slots(vec![Slot::Color("mauve")]);
        assert!(lines.is_empty());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn duplicate_lines_keep_first_occurrence() {
        let (lines, _) = emit_slots(vec![Slot::Stop, Slot::Effect("blink")]);
        let stops = lines.iter().filter(|l| *l == "CMD:STOP").count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn speed_default() {
        let (lines, _) = emit_slots(vec![Slot::Speed(SpeedValue::Default)]);
        assert_eq!(lines, vec!["CMD:SPEED=DEFAULT", "CMD:LCD=Speed: DEFAULT"]);
    }
}
