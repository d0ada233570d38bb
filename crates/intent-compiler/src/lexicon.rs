//! Static phrase tables and vocabularies.
//!
//! Everything in this module is read-only, process-wide data. Tables that
//! feed "first match wins" scans are ordered slices, so the tie-break rule is
//! the visible table order rather than hash-map iteration luck. Compiled
//! regexes live in `OnceLock` statics and are built on first use.

use regex::Regex;
use std::sync::OnceLock;

// === LED strip on/off ===

pub const LED_ON_PHRASES: &[&str] = &[
    "turn on led",
    "switch on led",
    "led on",
    "activate led",
    "led start",
    "power on led",
    "led strip on",
    "start glowing",
    "wake up the led",
    "led should glow",
    "fire up the led",
    "glow the strip",
    "turn everything bright",
    "light led up",
    "strip glow",
    "start the strip",
    "turn on the strip",
    "start up the glow",
    "beam the light",
    "make it lit",
];

pub const LED_OFF_PHRASES: &[&str] = &[
    "turn off led",
    "switch off led",
    "led off",
    "stop led",
    "cut the led",
    "shutdown leds",
    "power down led",
    "stop glowing",
    "kill led",
    "disable led",
    "stop the strip",
    "strip off",
    "mute the led",
    "shut the strip",
    "off the led",
    "cancel the glow",
    "turn off the led strip",
    "no more glow",
];

// === Room light relay ===

pub const LIGHT_ON_PHRASES: &[&str] = &[
    "turn on light",
    "switch on light",
    "light on",
    "enable the light",
    "start the lights",
    "light it up",
    "light up this place",
    "illuminate this room",
    "light the room",
    "start light",
    "wake up the light",
    "room light on",
];

pub const LIGHT_OFF_PHRASES: &[&str] = &[
    "turn off light",
    "switch off light",
    "light off",
    "cut the light",
    "shut the light",
    "kill the light",
    "disable light",
    "lights out",
    "turn off all lights",
    "turn off the bulb",
    "shut the bulb",
    "darken the room",
    "room light off",
];

// === Fan relay ===

pub const FAN_ON_PHRASES: &[&str] = &[
    "turn on fan",
    "fan on",
    "switch on fan",
    "start fan",
    "activate fan",
    "power up fan",
    "enable fan",
    "turn the fan on",
    "breeze on",
    "start the wind",
];

pub const FAN_OFF_PHRASES: &[&str] = &[
    "turn off fan",
    "fan off",
    "switch off fan",
    "stop fan",
    "kill fan",
    "power down fan",
    "shut the fan",
    "fan stop",
    "disable fan",
    "turn the fan off",
];

// === Colors ===

/// Full palette the controller firmware accepts.
pub const SUPPORTED_COLORS: &[&str] = &[
    // Primary colors
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "pink",
    "purple",
    "violet",
    "cyan",
    "magenta",
    // Whites and grays
    "warm white",
    "cool white",
    "soft white",
    "dim white",
    "gray",
    "dull gray",
    // Special shades
    "gold",
    "amber",
    "peach",
    "coral",
    "rose",
    "lavender",
    "mint",
    "moonlight",
    "sunset",
    "ocean",
    "sky blue",
    "dream blue",
    "frost white",
    // Pastels
    "pale blue",
    "pale purple",
    "pale pink",
    "pale green",
    "soft pink",
    "light blue",
    "light yellow",
    // Dim / dull / deep variants
    "dim red",
    "dim blue",
    "dim green",
    "dim purple",
    "dull red",
    "deep red",
    "deep purple",
    "deep cyan",
    "blood red",
    "blood orange",
    "forest green",
    // Neon
    "neon pink",
    "neon green",
    "neon blue",
    "glow green",
];

/// White-family names excluded from random color rotation.
pub const ROTATION_EXCLUDED_COLORS: &[&str] =
    &["warm white", "cool white", "soft white", "dim white", "frost white"];

/// Connective phrases that signal the clause is asking for a color.
pub const COLOR_INTENT_PHRASES: &[&str] = &[
    "make it",
    "turn on",
    "set color to",
    "switch to",
    "i want",
    "activate",
    "paint it",
    "show me",
    "enable",
    "bring in",
    "display",
    "light up with",
    "illuminate in",
    "use the color",
    "change to",
    "turn everything",
    "give me",
    "wrap the strip in",
    "wash the room with",
    "beam in",
    "glow in",
    "fire up",
    "make this place",
    "throw some",
    "i feel like",
    "go full",
    "paint everything",
    "bathe the room in",
    "paint the room in",
    "give it a touch of",
    "soak everything in",
    "fill it with",
    "splash some",
    "turn the lights to",
    "cover the room in",
    "change the vibe to",
    "i want to see",
    "surround me with",
    "push the color to",
];

/// "Change the color" with no color named: resolved by rotation.
pub const CHANGE_COLOR_PHRASES: &[&str] = &[
    "change the color",
    "switch the color",
    "rotate color",
    "different color",
    "another color",
    "next color",
    "cycle color",
    "give me a new color",
    "refresh the color",
    "color change",
    "change color",
    "change it up",
];

// === Effects ===

/// Scanned in order; first match wins, so compound names come before the
/// plain words they contain ("rainbow" before "rain").
pub const SUPPORTED_EFFECTS: &[&str] = &[
    "center_wave",
    "bounce_wave",
    "party_flash",
    "fire_glow",
    "fade_loop",
    "twinkle",
    "chase",
    "pulse",
    "blink",
    "wave",
    "thunder",
    "rainbow",
    "drizzle",
    "color_comet",
    "soft_glow",
    "fireworks",
    "heartbeat",
    "star_rain",
    "flash",
    "rain",
];

pub const CENTER_WAVE_PHRASES: &[&str] =
    &["center wave", "wave from the center", "from the middle"];

pub const BOUNCE_WAVE_PHRASES: &[&str] =
    &["bounce wave", "wave that bounces", "bounce in both directions"];

// === Rain modes ===

/// Mode keyword table in documented resolution order. The scan does not
/// short-circuit across modes: the last-listed matching mode wins.
pub const RAIN_MODES: &[(&str, &[&str])] = &[
    (
        "light",
        &["light rain", "a bit of rain", "drizzle", "soft rain", "tiny rain", "sprinkle rain"],
    ),
    (
        "medium",
        &["rain mode", "normal rain", "medium rain", "make it rain", "turn on rain", "rain vibe"],
    ),
    (
        "heavy",
        &["heavy rain", "storm rain", "big rain", "pouring rain", "hard rain"],
    ),
    (
        "thunderstorm",
        &["thunderstorm", "lightning rain", "storm mode", "rain with thunder", "crazy storm"],
    ),
];

// === Moods ===

pub const MOOD_MAP: &[(&str, &[&str])] = &[
    ("happy", &["happy", "joyful", "cheerful", "smiling", "delighted", "glad"]),
    ("sad", &["sad", "lonely", "depressed", "grieving", "crying", "nostalgic"]),
    ("anger", &["angry", "mad", "furious", "jealous", "annoyed", "frustrated"]),
    ("fear", &["scared", "fearful", "nervous", "anxious", "shy", "paranoid"]),
    ("love", &["romantic", "flirty", "intimate", "caring", "affectionate"]),
    ("calm", &["calm", "relaxed", "peaceful", "meditative", "balanced"]),
    ("excited", &["excited", "hopeful", "curious", "ecstatic"]),
    ("disgust", &["disgusted", "ashamed", "guilty", "embarrassed"]),
    ("playful", &["playful", "silly", "cheeky", "mischievous"]),
    ("neutral", &["neutral", "confused", "reflective", "indifferent"]),
    ("tired", &["tired", "sleepy", "burnt out", "sick", "drained"]),
];

pub const SUB_MOOD_MAP: &[(&str, &[&str])] = &[
    ("cheerful", &["cheerful", "joyful", "smiling"]),
    ("confident", &["confident", "proud"]),
    ("furious", &["furious", "enraged"]),
    ("flirty", &["flirty", "teasing"]),
    ("romantic", &["romantic", "in love", "lovey"]),
    ("relaxed", &["relaxed", "chill"]),
    ("nostalgic", &["nostalgic", "missing old days"]),
    ("guilty", &["guilty", "feeling bad"]),
    ("sleepy", &["sleepy", "ready to sleep"]),
    ("annoyed", &["annoyed", "irritated"]),
    ("jealous", &["jealous", "envious"]),
    ("nervous", &["nervous", "shaky"]),
    ("caring", &["caring", "sweet"]),
    ("frustrated", &["frustrated", "upset"]),
];

pub const DEFAULT_SUB_MOOD: &str = "default";

// === Qualitative intensity ladders ===

/// Speed words, scanned top to bottom; more specific phrases come before the
/// plain words they contain ("bit faster" before "faster" before "fast").
pub const SPEED_LADDER: &[(&str, u16)] = &[
    ("as fast as possible", 5),
    ("max speed", 5),
    ("very very fast", 10),
    ("so so fast", 10),
    ("very fast", 20),
    ("really fast", 20),
    ("bit faster", 50),
    ("slightly faster", 50),
    ("faster", 30),
    ("more fast", 30),
    ("dead slow", 600),
    ("ultra slow", 600),
    ("very very slow", 500),
    ("more slow", 500),
    ("very slow", 400),
    ("bit slow", 200),
    ("slightly slow", 200),
    ("slow", 300),
    ("fast", 80),
    ("normal", 150),
];

pub const SPEED_DEFAULT_PHRASES: &[&str] = &[
    "reset speed",
    "default speed",
    "speed default",
    "go back to default speed",
    "original speed",
    "revert speed",
];

pub const BRIGHTNESS_LADDER: &[(&str, u8)] = &[
    ("maximum brightness", 100),
    ("full brightness", 100),
    ("brightest", 100),
    ("very bright", 90),
    ("so bright", 90),
    ("normal brightness", 50),
    ("medium brightness", 50),
    ("lowest brightness", 0),
    ("no brightness", 0),
    ("bit dim", 30),
    ("slightly dim", 30),
    ("very dim", 10),
    ("super dim", 10),
    ("dim", 20),
    ("bright", 70),
];

// === LED count ===

pub const NUMLEDS_REGEX_PATTERNS: &[&str] = &[
    r"i want (\d+) lights? on",
    r"make only (\d+) lights?",
    r"just use (\d+) leds?",
    r"use only (\d+) leds?",
    r"show only (\d+) leds?",
    r"light up (\d+) leds?",
    r"enable (\d+) leds?",
    r"activate (\d+) lights?",
    r"turn on (\d+) leds?",
    r"glow (\d+) leds?",
    r"only (\d+) leds?",
    r"put (\d+) lights? on",
];

pub const NUMLEDS_PHRASES: &[&str] = &[
    "set leds to",
    "num leds",
    "number of leds",
    "active leds",
    "change led count",
    "only use",
    "activate only",
    "turn on only",
    "glow only",
    "limit leds to",
    "restrict leds to",
    "light up this many",
    "limit it to",
    "keep only",
    "illuminate only",
    "restrict to",
    "just this count",
];

// === Stop ===

pub const STOP_PHRASES: &[&str] = &[
    "stop everything",
    "kill effects",
    "turn off effect",
    "stop all",
    "end animation",
    "halt",
    "cancel",
    "terminate",
    "shutdown effect",
    "kill all animations",
];

// === LCD ===

/// Trigger word followed by the text to display. "show" and "put" are
/// deliberately absent: they collide with color and LED-count phrasing.
pub const LCD_TRIGGER_WORDS: &[&str] = &["write", "display", "say", "type", "print"];

/// Fixed conversational phrases with fixed replies.
pub const LCD_CANNED_REPLIES: &[(&str, &str)] = &[
    ("show welcome message", "Welcome home"),
    ("greet me", "Hello, friend!"),
    ("how are you", "Always lit"),
    ("who are you", "Your LED buddy"),
    ("introduce yourself", "Lighting crew"),
    ("are you online", "Fully alive"),
    ("say hi", "Hi there"),
    ("good morning", "Rise and shine"),
    ("good night", "Dream in RGB"),
    ("what time is it", "I'm timeless"),
    ("are you ready", "Born ready"),
    ("thanks", "Always here"),
    ("what can you do", "Light and dazzle"),
];

// === Normalizer data ===

/// Filler phrases removed by whole-phrase substring deletion. Nothing in
/// this list may appear inside another table's phrases.
pub const FILLER_PHRASES: &[&str] = &[
    "please",
    "kinda",
    "sort of",
    "can you",
    "could you",
    "will you",
    "let me",
    "need to",
    "wanna",
];

/// Typo and shorthand rewrites. Invariant for idempotence: no key occurs as
/// a substring of its own replacement, and no replacement introduces a key.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("centerwave", "center wave"),
    ("bouncewave", "bounce wave"),
    ("fireglow", "fire_glow"),
    ("partyflash", "party_flash"),
    ("fade loop", "fade_loop"),
    ("fastest", "as fast as possible"),
    ("full bright", "maximum brightness"),
    ("brightness 100 percent", "brightness 100"),
    ("super fast", "speed 10"),
    ("super slow", "speed 600"),
];

// === Segmenter data ===

/// Connectives that split one utterance into independent clauses.
pub const CONNECTIVE_PATTERN: &str =
    r"\b(?:and then|after that|along with|and|then|also|plus|with)\b";

// === Compiled regexes ===

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid regex pattern - this is a bug")
}

pub(crate) fn connective_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(CONNECTIVE_PATTERN))
}

pub(crate) fn percent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"(\d+)\s*%"))
}

pub(crate) fn brightness_clamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"brightness\s*[:=]?\s*(\d+)"))
}

pub(crate) fn speed_clamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"speed\s*[:=]?\s*(\d+)"))
}

pub(crate) fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"\s+"))
}

pub(crate) fn speed_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"(?:set speed to|change speed to|effect speed|speed)[^\d]*(\d+)"))
}

pub(crate) fn brightness_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        build(r"(?:set brightness to|brightness level|adjust brightness|brightness)[^\d]*(\d+)")
    })
}

pub(crate) fn led_index_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"(?:led index|highlight led|led number)[^\d]*(\d+)"))
}

pub(crate) fn led_range_regexes() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?:led ?range|range)[^\d]*(\d+)[,\s]+(\d+)",
            r"(?:from|between)[^\d]*(\d+)[^\d]+(\d+)",
            r"(\d+)[^\d]+(?:to|and)[^\d]+(\d+)",
        ]
        .iter()
        .map(|p| build(p))
        .collect()
    })
}

pub(crate) fn numleds_regexes() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| NUMLEDS_REGEX_PATTERNS.iter().map(|p| build(p)).collect())
}

pub(crate) fn first_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"\d+"))
}

// === Vocabulary lookups ===

/// Canonical palette entry for a color name, if supported.
pub fn canonical_color(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SUPPORTED_COLORS.iter().find(|c| **c == name).copied()
}

/// Canonical effect name, if supported.
pub fn canonical_effect(name: &str) -> Option<&'static str> {
    let name = name.trim();
    SUPPORTED_EFFECTS.iter().find(|e| **e == name).copied()
}

/// Canonical primary mood name, if known.
pub fn canonical_mood(name: &str) -> Option<&'static str> {
    let name = name.trim();
    MOOD_MAP.iter().map(|(m, _)| *m).find(|m| *m == name)
}

/// Canonical sub-mood name; unknown names fall back to `None`.
pub fn canonical_sub_mood(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if name == DEFAULT_SUB_MOOD {
        return Some(DEFAULT_SUB_MOOD);
    }
    SUB_MOOD_MAP.iter().map(|(s, _)| *s).find(|s| *s == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrections_are_idempotence_safe() {
        for (wrong, right) in CORRECTIONS {
            assert!(
                !right.contains(wrong),
                "correction {wrong:?} -> {right:?} would re-trigger itself"
            );
            for (other, _) in CORRECTIONS {
                if other != wrong {
                    assert!(
                        !right.contains(other),
                        "replacement {right:?} introduces key {other:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn fillers_do_not_shadow_phrase_tables() {
        let tables: &[&[&str]] = &[
            LED_ON_PHRASES,
            LED_OFF_PHRASES,
            LIGHT_ON_PHRASES,
            LIGHT_OFF_PHRASES,
            FAN_ON_PHRASES,
            FAN_OFF_PHRASES,
            COLOR_INTENT_PHRASES,
            CHANGE_COLOR_PHRASES,
            STOP_PHRASES,
            NUMLEDS_PHRASES,
        ];
        for filler in FILLER_PHRASES {
            for table in tables {
                for phrase in *table {
                    assert!(
                        !phrase.contains(filler),
                        "filler {filler:?} would mangle phrase {phrase:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn compound_effects_listed_before_their_substrings() {
        let pos = |name: &str| {
            SUPPORTED_EFFECTS
                .iter()
                .position(|e| *e == name)
                .unwrap_or(usize::MAX)
        };
        assert!(pos("rainbow") < pos("rain"));
        assert!(pos("star_rain") < pos("rain"));
        assert!(pos("party_flash") < pos("flash"));
        assert!(pos("center_wave") < pos("wave"));
        assert!(pos("bounce_wave") < pos("wave"));
    }

    #[test]
    fn rotation_exclusions_are_palette_members() {
        for c in ROTATION_EXCLUDED_COLORS {
            assert!(SUPPORTED_COLORS.contains(c));
        }
    }

    #[test]
    fn ladder_values_are_in_range() {
        for (_, v) in SPEED_LADDER {
            assert!((1..=1000).contains(v));
        }
        for (_, v) in BRIGHTNESS_LADDER {
            assert!(*v <= 100);
        }
    }

    #[test]
    fn canned_replies_fit_one_lcd_line() {
        for (_, reply) in LCD_CANNED_REPLIES {
            assert!(reply.len() <= 16, "canned reply {reply:?} wider than LCD");
        }
    }

    #[test]
    fn vocabulary_lookups() {
        assert_eq!(canonical_color("sky blue"), Some("sky blue"));
        assert_eq!(canonical_color("mauve"), None);
        assert_eq!(canonical_effect("fire_glow"), Some("fire_glow"));
        assert_eq!(canonical_effect("disco"), None);
        assert_eq!(canonical_mood("happy"), Some("happy"));
        assert_eq!(canonical_sub_mood("default"), Some("default"));
        assert_eq!(canonical_sub_mood("bored"), None);
    }
}
