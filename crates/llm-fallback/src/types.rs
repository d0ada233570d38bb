//! The JSON shape an oracle is asked to produce, and its conversion into
//! typed slots.

use intent_compiler::lexicon;
use intent_compiler::{Device, RainMode, Slot, SpeedValue, Switch};
use serde::Deserialize;
use tracing::debug;

/// Speed as models actually write it: a number or a word like "fast".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpeedField {
    Number(i64),
    Word(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelayField {
    pub target: String,
    pub state: String,
}

/// One oracle response. Every field is optional; absent keys mean the model
/// saw no such intent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FallbackIntent {
    pub led: Option<String>,
    pub relay: Option<RelayField>,
    pub color: Option<String>,
    pub effect: Option<String>,
    pub mood: Option<String>,
    pub rain: Option<String>,
    pub brightness: Option<i64>,
    pub speed: Option<SpeedField>,
    pub numleds: Option<i64>,
    pub ledindex: Option<i64>,
    pub ledrange: Option<String>,
    pub stop: Option<bool>,
    pub lcd: Option<String>,
}

fn parse_switch(s: &str) -> Option<Switch> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "1" => Some(Switch::On),
        "off" | "false" | "0" => Some(Switch::Off),
        _ => None,
    }
}

impl FallbackIntent {
    /// Validate every field against the same lexicon and ranges the rule
    /// extractors use. Fields that fail validation are dropped, not errors;
    /// the model is untrusted input.
    pub fn into_slots(self) -> Vec<Slot> {
        let mut slots = Vec::new();

        if let Some(state) = self.led.as_deref().and_then(parse_switch) {
            slots.push(Slot::DeviceState { device: Device::Led, state });
        }
        if let Some(relay) = &self.relay {
            let device = match relay.target.trim().to_lowercase().as_str() {
                "light" | "lamp" => Some(Device::Light),
                "fan" => Some(Device::Fan),
                _ => None,
            };
            match (device, parse_switch(&relay.state)) {
                (Some(device), Some(state)) => {
                    slots.push(Slot::DeviceState { device, state });
                }
                _ => debug!(?relay, "dropping unrecognized relay field"),
            }
        }
        if let Some(name) = self.color.as_deref() {
            match lexicon::canonical_color(&name.to_lowercase()) {
                Some(color) => slots.push(Slot::Color(color)),
                None => debug!(name, "dropping unsupported color"),
            }
        }
        if let Some(name) = self.effect.as_deref() {
            match lexicon::canonical_effect(&name.to_lowercase()) {
                Some(effect) => slots.push(Slot::Effect(effect)),
                None => debug!(name, "dropping unsupported effect"),
            }
        }
        if let Some(raw) = self.mood.as_deref() {
            let lowered = raw.to_lowercase();
            let (primary, sub) = match lowered.split_once(':') {
                Some((p, s)) => (p, s),
                None => (lowered.as_str(), "default"),
            };
            match lexicon::canonical_mood(primary) {
                Some(primary) => {
                    let sub = lexicon::canonical_sub_mood(sub).unwrap_or("default");
                    slots.push(Slot::Mood { primary, sub });
                }
                None => debug!(raw, "dropping unsupported mood"),
            }
        }
        if let Some(name) = self.rain.as_deref() {
            match RainMode::from_name(name.trim().to_lowercase().as_str()) {
                Some(mode) => slots.push(Slot::Rain(mode)),
                None => debug!(name, "dropping unsupported rain mode"),
            }
        }
        if let Some(value) = self.brightness {
            if (0..=100).contains(&value) {
                slots.push(Slot::Brightness(value as u8));
            } else {
                debug!(value, "dropping out-of-range brightness");
            }
        }
        if let Some(speed) = &self.speed {
            match speed_value(speed) {
                Some(value) => slots.push(Slot::Speed(value)),
                None => debug!(?speed, "dropping unusable speed"),
            }
        }
        if let Some(value) = self.numleds {
            if (1..=300).contains(&value) {
                slots.push(Slot::NumLeds(value as u16));
            } else {
                debug!(value, "dropping out-of-range led count");
            }
        }
        if let Some(value) = self.ledindex {
            if (0..=299).contains(&value) {
                slots.push(Slot::LedIndex(value as u16));
            } else {
                debug!(value, "dropping out-of-range led index");
            }
        }
        if let Some(raw) = self.ledrange.as_deref() {
            match parse_range(raw) {
                Some((start, end)) => slots.push(Slot::LedRange { start, end }),
                None => debug!(raw, "dropping unusable led range"),
            }
        }
        if self.stop == Some(true) {
            slots.push(Slot::Stop);
        }
        if let Some(text) = self.lcd {
            let text = text.trim().to_string();
            if !text.is_empty() {
                slots.push(Slot::LcdText(text));
            }
        }

        slots
    }
}

fn speed_value(field: &SpeedField) -> Option<SpeedValue> {
    match field {
        SpeedField::Number(n) if (1..=1000).contains(n) => Some(SpeedValue::Exact(*n as u16)),
        SpeedField::Number(_) => None,
        SpeedField::Word(word) => match word.trim().to_lowercase().as_str() {
            "default" | "normal" => Some(SpeedValue::Default),
            "fast" => Some(SpeedValue::Exact(10)),
            "slow" => Some(SpeedValue::Exact(300)),
            _ => None,
        },
    }
}

fn parse_range(raw: &str) -> Option<(u16, u16)> {
    let (a, b) = raw.split_once([',', '-'])?;
    let a: u16 = a.trim().parse().ok()?;
    let b: u16 = b.trim().parse().ok()?;
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if end > 299 {
        return None;
    }
    Some((start, end))
}
