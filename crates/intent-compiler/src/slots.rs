//! Typed slots and the per-compile command set.

use serde::Serialize;

/// Switchable devices. LED strip state and the two relay channels are keyed
/// independently so a combo utterance can address all three at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Device {
    Led,
    Light,
    Fan,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Led => "led",
            Device::Light => "light",
            Device::Fan => "fan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn as_str(self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RainMode {
    Light,
    Medium,
    Heavy,
    Thunderstorm,
}

impl RainMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RainMode::Light => "light",
            RainMode::Medium => "medium",
            RainMode::Heavy => "heavy",
            RainMode::Thunderstorm => "thunderstorm",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(RainMode::Light),
            "medium" => Some(RainMode::Medium),
            "heavy" => Some(RainMode::Heavy),
            "thunderstorm" => Some(RainMode::Thunderstorm),
            _ => None,
        }
    }
}

/// Effect speed: an exact period or the firmware default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedValue {
    Exact(u16),
    Default,
}

/// One resolved piece of intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Slot {
    DeviceState { device: Device, state: Switch },
    Color(&'static str),
    Effect(&'static str),
    Mood { primary: &'static str, sub: &'static str },
    Rain(RainMode),
    Speed(SpeedValue),
    Brightness(u8),
    NumLeds(u16),
    LedIndex(u16),
    LedRange { start: u16, end: u16 },
    Stop,
    LcdText(String),
}

/// Merge key for a slot. Device states get one key per device; everything
/// else is single-valued per compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlotKind {
    LedState,
    RelayLight,
    RelayFan,
    Color,
    Effect,
    Mood,
    Rain,
    Speed,
    Brightness,
    NumLeds,
    LedIndex,
    LedRange,
    Stop,
    LcdText,
}

impl Slot {
    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::DeviceState { device: Device::Led, .. } => SlotKind::LedState,
            Slot::DeviceState { device: Device::Light, .. } => SlotKind::RelayLight,
            Slot::DeviceState { device: Device::Fan, .. } => SlotKind::RelayFan,
            Slot::Color(_) => SlotKind::Color,
            Slot::Effect(_) => SlotKind::Effect,
            Slot::Mood { .. } => SlotKind::Mood,
            Slot::Rain(_) => SlotKind::Rain,
            Slot::Speed(_) => SlotKind::Speed,
            Slot::Brightness(_) => SlotKind::Brightness,
            Slot::NumLeds(_) => SlotKind::NumLeds,
            Slot::LedIndex(_) => SlotKind::LedIndex,
            Slot::LedRange { .. } => SlotKind::LedRange,
            Slot::Stop => SlotKind::Stop,
            Slot::LcdText(_) => SlotKind::LcdText,
        }
    }
}

/// Insertion-ordered slot map for one compile call. Later writes to the same
/// kind replace the value but keep the original position, so extraction
/// order stays visible to the emitter.
#[derive(Debug, Default, Clone)]
pub struct CommandSet {
    entries: Vec<(SlotKind, Slot)>,
}

impl CommandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: Slot) {
        let kind = slot.kind();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = slot;
        } else {
            self.entries.push((kind, slot));
        }
    }

    pub fn get(&self, kind: SlotKind) -> Option<&Slot> {
        self.entries.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn contains(&self, kind: SlotKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.entries.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Slot> for CommandSet {
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        let mut set = CommandSet::new();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}
