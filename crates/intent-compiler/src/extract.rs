//! Per-clause slot extractors.
//!
//! Each detector maps one clause to at most one value for its slot and sees
//! no state from other clauses. `extract_clause` runs them in a fixed,
//! documented order; the merger resolves cross-clause conflicts.

use crate::error::Diagnostic;
use crate::lexicon;
use crate::slots::{Device, RainMode, Slot, SlotKind, SpeedValue, Switch};
use std::sync::OnceLock;
use tracing::debug;

/// Extraction result for one clause.
#[derive(Debug, Default, Clone)]
pub struct ClauseSlots {
    /// Slots in evaluation order.
    pub slots: Vec<Slot>,
    /// A "change the color" request with no color named; the merger resolves
    /// it against its rotation memory.
    pub wants_color_rotation: bool,
}

impl ClauseSlots {
    fn push(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    pub fn has(&self, kind: SlotKind) -> bool {
        self.slots.iter().any(|s| s.kind() == kind)
    }
}

/// Run every detector over one clause, in the fixed evaluation order.
pub fn extract_clause(clause: &str, diags: &mut Vec<Diagnostic>) -> ClauseSlots {
    let mut out = ClauseSlots::default();

    for slot in detect_device_states(clause) {
        out.push(slot);
    }

    let effect = detect_effect(clause);
    match detect_color(clause, effect.is_some(), diags) {
        Some(color) => out.push(Slot::Color(color)),
        None => {
            if detect_color_rotation(clause) {
                out.wants_color_rotation = true;
            }
        }
    }

    if let Some(effect) = effect {
        out.push(Slot::Effect(effect));
    }

    if let Some(speed) = detect_speed(clause, diags) {
        out.push(Slot::Speed(speed));
    }
    if let Some(b) = detect_brightness(clause, diags) {
        out.push(Slot::Brightness(b));
    }
    if let Some(idx) = detect_led_index(clause, diags) {
        out.push(Slot::LedIndex(idx));
    }
    if let Some((start, end)) = detect_led_range(clause, diags) {
        out.push(Slot::LedRange { start, end });
    }
    if let Some(n) = detect_num_leds(clause, diags) {
        out.push(Slot::NumLeds(n));
    }

    if let Some(mode) = detect_rain(clause) {
        out.push(Slot::Rain(mode));
    }

    if detect_stop(clause) {
        out.push(Slot::Stop);
    }

    if let Some(text) = detect_lcd(clause) {
        out.push(Slot::LcdText(text));
    }

    debug!(clause, slots = out.slots.len(), "clause extracted");
    out
}

// === Word-boundary helpers ===

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Position of `phrase` in `text` where neither neighbor is alphanumeric.
fn find_word(text: &str, phrase: &str) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(rel) = text[from..].find(phrase) {
        let at = from + rel;
        let end = at + phrase.len();
        let before_ok = at == 0 || !is_word_byte(bytes[at - 1]);
        let after_ok = end == text.len() || !is_word_byte(bytes[end]);
        if before_ok && after_ok {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

fn contains_word(text: &str, phrase: &str) -> bool {
    find_word(text, phrase).is_some()
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

// === Device on/off ===

/// LED strip and relay switches. The ON list is checked before OFF per
/// device, so a clause somehow matching both resolves to ON; ties within a
/// list resolve to the first-listed phrase.
fn detect_device_states(clause: &str) -> Vec<Slot> {
    let table: &[(Device, &[&str], &[&str])] = &[
        (Device::Led, lexicon::LED_ON_PHRASES, lexicon::LED_OFF_PHRASES),
        (Device::Light, lexicon::LIGHT_ON_PHRASES, lexicon::LIGHT_OFF_PHRASES),
        (Device::Fan, lexicon::FAN_ON_PHRASES, lexicon::FAN_OFF_PHRASES),
    ];
    let mut out = Vec::new();
    for (device, on, off) in table {
        let state = if contains_any(clause, on) {
            Some(Switch::On)
        } else if contains_any(clause, off) {
            Some(Switch::Off)
        } else {
            None
        };
        if let Some(state) = state {
            out.push(Slot::DeviceState { device: *device, state });
        }
    }
    out
}

// === Color ===

fn colors_longest_first() -> &'static [&'static str] {
    static SORTED: OnceLock<Vec<&'static str>> = OnceLock::new();
    SORTED.get_or_init(|| {
        let mut v = lexicon::SUPPORTED_COLORS.to_vec();
        v.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        v
    })
}

/// A color is accepted when the name appears on a word boundary and either a
/// color-intent phrase co-occurs or no effect was recognized in the clause.
/// Longest names match first so "sky blue" beats "blue".
fn detect_color(
    clause: &str,
    effect_present: bool,
    diags: &mut Vec<Diagnostic>,
) -> Option<&'static str> {
    let color = colors_longest_first()
        .iter()
        .find(|c| contains_word(clause, c))
        .copied()?;
    let intent = contains_any(clause, lexicon::COLOR_INTENT_PHRASES);
    if intent && effect_present {
        diags.push(Diagnostic::AmbiguousClause { clause: clause.to_string() });
    }
    if intent || !effect_present {
        Some(color)
    } else {
        None
    }
}

fn detect_color_rotation(clause: &str) -> bool {
    contains_any(clause, lexicon::CHANGE_COLOR_PHRASES)
}

// === Effect ===

/// Multi-word overrides first, then the ordered effect table scan.
fn detect_effect(clause: &str) -> Option<&'static str> {
    if contains_any(clause, lexicon::CENTER_WAVE_PHRASES) {
        return Some("center_wave");
    }
    if contains_any(clause, lexicon::BOUNCE_WAVE_PHRASES) {
        return Some("bounce_wave");
    }
    lexicon::SUPPORTED_EFFECTS
        .iter()
        .find(|e| clause.contains(*e))
        .copied()
}

// === Numeric slots ===

fn capture_number(clause: &str, re: &regex::Regex) -> Option<i64> {
    re.captures(clause)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))
}

fn detect_speed(clause: &str, diags: &mut Vec<Diagnostic>) -> Option<SpeedValue> {
    if contains_any(clause, lexicon::SPEED_DEFAULT_PHRASES) {
        return Some(SpeedValue::Default);
    }
    if let Some(v) = capture_number(clause, lexicon::speed_regex()) {
        if (1..=1000).contains(&v) {
            return Some(SpeedValue::Exact(v as u16));
        }
        diags.push(Diagnostic::OutOfRange { slot: "speed", value: v, min: 1, max: 1000 });
        return None;
    }
    lexicon::SPEED_LADDER
        .iter()
        .find(|(phrase, _)| clause.contains(phrase))
        .map(|(_, v)| SpeedValue::Exact(*v))
}

fn detect_brightness(clause: &str, diags: &mut Vec<Diagnostic>) -> Option<u8> {
    if let Some(v) = capture_number(clause, lexicon::brightness_regex()) {
        if (0..=100).contains(&v) {
            return Some(v as u8);
        }
        diags.push(Diagnostic::OutOfRange { slot: "brightness", value: v, min: 0, max: 100 });
        return None;
    }
    lexicon::BRIGHTNESS_LADDER
        .iter()
        .find(|(phrase, _)| clause.contains(phrase))
        .map(|(_, v)| *v)
}

fn detect_led_index(clause: &str, diags: &mut Vec<Diagnostic>) -> Option<u16> {
    let v = capture_number(clause, lexicon::led_index_regex())?;
    if (0..=299).contains(&v) {
        return Some(v as u16);
    }
    diags.push(Diagnostic::OutOfRange { slot: "led index", value: v, min: 0, max: 299 });
    None
}

/// Two numbers in either order, auto-sorted into `(start, end)`. The first
/// matching template decides; a captured pair violating the invariant
/// rejects the slot rather than falling through to looser templates.
fn detect_led_range(clause: &str, diags: &mut Vec<Diagnostic>) -> Option<(u16, u16)> {
    for re in lexicon::led_range_regexes() {
        let Some(caps) = re.captures(clause) else {
            continue;
        };
        let a = caps
            .get(1)
            .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))?;
        let b = caps
            .get(2)
            .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))?;
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start < end && (0..=299).contains(&end) {
            return Some((start as u16, end as u16));
        }
        diags.push(Diagnostic::InvalidRange { start, end });
        return None;
    }
    None
}

fn detect_num_leds(clause: &str, diags: &mut Vec<Diagnostic>) -> Option<u16> {
    for re in lexicon::numleds_regexes() {
        let Some(caps) = re.captures(clause) else {
            continue;
        };
        let v = caps
            .get(1)
            .map(|m| m.as_str().parse::<i64>().unwrap_or(i64::MAX))?;
        if (1..=300).contains(&v) {
            return Some(v as u16);
        }
        diags.push(Diagnostic::OutOfRange { slot: "led count", value: v, min: 1, max: 300 });
        return None;
    }
    // Keyword phrase plus the first number in the clause
    for phrase in lexicon::NUMLEDS_PHRASES {
        if !clause.contains(phrase) {
            continue;
        }
        let Some(m) = lexicon::first_number_regex().find(clause) else {
            return None;
        };
        let v = m.as_str().parse::<i64>().unwrap_or(i64::MAX);
        if (1..=300).contains(&v) {
            return Some(v as u16);
        }
        diags.push(Diagnostic::OutOfRange { slot: "led count", value: v, min: 1, max: 300 });
        return None;
    }
    None
}

// === Rain ===

/// Modes are scanned in table order without short-circuiting across modes,
/// so the last-listed matching mode wins. Documented resolution order; see
/// the lexicon table.
fn detect_rain(clause: &str) -> Option<RainMode> {
    let mut found = None;
    for (mode, keywords) in lexicon::RAIN_MODES {
        if contains_any(clause, keywords) {
            found = RainMode::from_name(mode);
        }
    }
    found
}

// === Mood ===

/// Primary mood paired with an independently detected sub-mood. Runs over
/// the whole utterance before segmentation, not per clause.
pub fn detect_mood(text: &str) -> Option<(&'static str, &'static str)> {
    let primary = lexicon::MOOD_MAP
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(mood, _)| *mood)?;
    let sub = lexicon::SUB_MOOD_MAP
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(sub, _)| *sub)
        .unwrap_or(lexicon::DEFAULT_SUB_MOOD);
    Some((primary, sub))
}

// === Stop ===

fn detect_stop(clause: &str) -> bool {
    contains_any(clause, lexicon::STOP_PHRASES)
}

// === LCD ===

/// Canned replies first; otherwise a trigger word with the remainder of the
/// clause as the literal display text.
fn detect_lcd(clause: &str) -> Option<String> {
    for (phrase, reply) in lexicon::LCD_CANNED_REPLIES {
        if clause.contains(phrase) {
            return Some((*reply).to_string());
        }
    }
    for trigger in lexicon::LCD_TRIGGER_WORDS {
        if let Some(at) = find_word(clause, trigger) {
            let rest = clause[at + trigger.len()..].trim();
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(clause: &str) -> ClauseSlots {
        let mut diags = Vec::new();
        extract_clause(clause, &mut diags)
    }

    fn extract_with_diags(clause: &str) -> (ClauseSlots, Vec<Diagnostic>) {
        let mut diags = Vec::new();
        let out = extract_clause(clause, &mut diags);
        (out, diags)
    }

    #[test]
    fn device_states() {
        let out = extract("turn on led");
        assert_eq!(
            out.slots,
            vec![Slot::DeviceState { device: Device::Led, state: Switch::On }]
        );
        let out = extract("fan off");
        assert_eq!(
            out.slots,
            vec![Slot::DeviceState { device: Device::Fan, state: Switch::Off }]
        );
        let out = extract("turn off the bulb");
        assert_eq!(
            out.slots,
            vec![Slot::DeviceState { device: Device::Light, state: Switch::Off }]
        );
    }

    #[test]
    fn on_list_wins_over_off() {
        // matches "led on" (ON) and "off the led" (OFF); ON is checked first
        let out = extract("led on off the led");
        assert_eq!(
            out.slots,
            vec![Slot::DeviceState { device: Device::Led, state: Switch::On }]
        );
    }

    #[test]
    fn color_with_intent_phrase() {
        let out = extract("make it red");
        assert_eq!(out.slots, vec![Slot::Color("red")]);
    }

    #[test]
    fn bare_color_without_effect_is_accepted() {
        let out = extract("deep purple");
        assert_eq!(out.slots, vec![Slot::Color("deep purple")]);
    }

    #[test]
    fn bare_color_with_effect_is_suppressed() {
        let out = extract("red pulse");
        assert_eq!(out.slots, vec![Slot::Effect("pulse")]);
    }

    #[test]
    fn color_and_effect_with_intent_keeps_both() {
        let (out, diags) = extract_with_diags("make it red pulse");
        assert_eq!(out.slots, vec![Slot::Color("red"), Slot::Effect("pulse")]);
        assert!(matches!(diags[0], Diagnostic::AmbiguousClause { .. }));
    }

    #[test]
    fn color_names_match_on_word_boundaries() {
        assert!(extract("pair the bluetooth speaker").slots.is_empty());
        let out = extract("make it sky blue");
        assert_eq!(out.slots, vec![Slot::Color("sky blue")]);
    }

    #[test]
    fn change_color_sets_rotation_flag() {
        let out = extract("give me a new color");
        assert!(out.wants_color_rotation);
        assert!(out.slots.is_empty());
    }

    #[test]
    fn explicit_color_beats_rotation() {
        let out = extract("change the color to blue");
        assert!(!out.wants_color_rotation);
        assert_eq!(out.slots, vec![Slot::Color("blue")]);
    }

    #[test]
    fn effect_overrides() {
        assert_eq!(extract("wave from the center").slots, vec![Slot::Effect("center_wave")]);
        assert_eq!(
            extract("bounce in both directions").slots,
            vec![Slot::Effect("bounce_wave")]
        );
    }

    #[test]
    fn effect_table_order_prefers_compound_names() {
        assert_eq!(extract("rainbow").slots, vec![Slot::Effect("rainbow")]);
    }

    #[test]
    fn speed_regex_beats_ladder() {
        let out = extract("set speed to 250 very fast");
        assert_eq!(out.slots, vec![Slot::Speed(SpeedValue::Exact(250))]);
    }

    #[test]
    fn speed_ladder() {
        assert_eq!(extract("very fast").slots, vec![Slot::Speed(SpeedValue::Exact(20))]);
        assert_eq!(extract("bit faster").slots, vec![Slot::Speed(SpeedValue::Exact(50))]);
        assert_eq!(extract("dead slow").slots, vec![Slot::Speed(SpeedValue::Exact(600))]);
    }

    #[test]
    fn speed_default_phrases() {
        assert_eq!(extract("revert speed").slots, vec![Slot::Speed(SpeedValue::Default)]);
    }

    #[test]
    fn speed_out_of_range_is_dropped() {
        let (out, diags) = extract_with_diags("set speed to 0");
        assert!(out.slots.is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::OutOfRange { slot: "speed", value: 0, min: 1, max: 1000 }]
        );
    }

    #[test]
    fn brightness_regex_and_ladder() {
        assert_eq!(extract("brightness 45").slots, vec![Slot::Brightness(45)]);
        assert_eq!(extract("very dim").slots, vec![Slot::Brightness(10)]);
    }

    #[test]
    fn brightness_out_of_range_is_dropped() {
        let (out, diags) = extract_with_diags("brightness level 500");
        assert!(out.slots.is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::OutOfRange { slot: "brightness", value: 500, min: 0, max: 100 }]
        );
    }

    #[test]
    fn led_index() {
        assert_eq!(extract("highlight led 42").slots, vec![Slot::LedIndex(42)]);
        let (out, diags) = extract_with_diags("led index 400");
        assert!(out.slots.is_empty());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn led_range_sorts_and_validates() {
        assert_eq!(
            extract("glow from 120 to 40").slots,
            vec![Slot::LedRange { start: 40, end: 120 }]
        );
        let (out, diags) = extract_with_diags("from 0 to 400");
        assert!(out.slots.is_empty());
        assert_eq!(diags, vec![Diagnostic::InvalidRange { start: 0, end: 400 }]);
    }

    #[test]
    fn led_range_rejects_empty_span() {
        let (out, diags) = extract_with_diags("from 5 to 5");
        assert!(out.slots.is_empty());
        assert_eq!(diags, vec![Diagnostic::InvalidRange { start: 5, end: 5 }]);
    }

    #[test]
    fn num_leds_regex_templates() {
        assert_eq!(extract("i want 50 lights on").slots, vec![Slot::NumLeds(50)]);
        assert_eq!(extract("use only 12 leds").slots, vec![Slot::NumLeds(12)]);
    }

    #[test]
    fn num_leds_phrase_fallback() {
        assert_eq!(extract("limit leds to 30").slots, vec![Slot::NumLeds(30)]);
    }

    #[test]
    fn num_leds_out_of_range() {
        let (out, diags) = extract_with_diags("use only 500 leds");
        assert!(out.slots.is_empty());
        assert_eq!(
            diags,
            vec![Diagnostic::OutOfRange { slot: "led count", value: 500, min: 1, max: 300 }]
        );
    }

    #[test]
    fn rain_last_matching_mode_wins() {
        // "rain" is also an effect name; both slots come out, like the wire
        // protocol expects
        assert_eq!(
            extract("soft rain").slots,
            vec![Slot::Effect("rain"), Slot::Rain(RainMode::Light)]
        );
        // keywords from two modes in one clause: the later-listed mode wins
        let out = extract("soft rain thunderstorm");
        assert_eq!(
            out.slots,
            vec![Slot::Effect("thunder"), Slot::Rain(RainMode::Thunderstorm)]
        );
    }

    #[test]
    fn drizzle_is_both_effect_and_rain() {
        let out = extract("drizzle");
        assert_eq!(
            out.slots,
            vec![Slot::Effect("drizzle"), Slot::Rain(RainMode::Light)]
        );
    }

    #[test]
    fn mood_with_and_without_sub() {
        assert_eq!(detect_mood("i am feeling romantic tonight"), Some(("love", "romantic")));
        assert_eq!(detect_mood("so happy right here"), Some(("happy", "default")));
        assert_eq!(detect_mood("nothing interesting"), None);
    }

    #[test]
    fn stop_phrases() {
        assert!(extract("stop everything").has(SlotKind::Stop));
        assert!(extract("halt").has(SlotKind::Stop));
    }

    #[test]
    fn lcd_trigger_takes_remainder() {
        let out = extract("display hello world");
        assert!(out.slots.contains(&Slot::LcdText("hello world".to_string())));
    }

    #[test]
    fn lcd_canned_reply() {
        let out = extract("good morning");
        assert_eq!(out.slots, vec![Slot::LcdText("Rise and shine".to_string())]);
    }

    #[test]
    fn lcd_trigger_without_text_is_ignored() {
        assert!(extract("print").slots.is_empty());
    }
}
