//! Lenient JSON recovery for model output.
//!
//! Models wrap the object in prose, use single quotes, or emit Python-style
//! literals. Three passes: parse the first brace block as-is, parse it again
//! after literal repair, then scavenge individual key/value pairs. If all
//! three fail the response is treated as no result.

use crate::types::FallbackIntent;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid regex pattern - this is a bug")
}

fn brace_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| build(r"(?s)\{.*\}"))
}

fn scavenge_regexes() -> &'static [(&'static str, Regex)] {
    static RES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    const KEYS: &[&str] = &[
        "led",
        "color",
        "effect",
        "mood",
        "rain",
        "brightness",
        "speed",
        "numleds",
        "ledindex",
        "ledrange",
        "lcd",
        "stop",
    ];
    RES.get_or_init(|| {
        KEYS.iter()
            .map(|key| {
                let pattern =
                    format!(r#""?{key}"?\s*[:=]\s*"?([a-zA-Z0-9][a-zA-Z0-9 ,:_-]*)"?"#);
                (*key, build(&pattern))
            })
            .collect()
    })
}

/// Replace the Python-flavored literals models love to emit.
fn repair(block: &str) -> String {
    block
        .replace('\'', "\"")
        .replace("True", "true")
        .replace("False", "false")
        .replace("None", "null")
}

/// Pull a [`FallbackIntent`] out of raw model output, or `None` if nothing
/// parseable is there.
pub fn extract_intent(raw: &str) -> Option<FallbackIntent> {
    let block = brace_block_regex().find(raw).map(|m| m.as_str());

    if let Some(block) = block {
        if let Ok(intent) = serde_json::from_str::<FallbackIntent>(block) {
            return Some(intent);
        }
        let repaired = repair(block);
        if let Ok(intent) = serde_json::from_str::<FallbackIntent>(&repaired) {
            debug!("recovered intent from repaired JSON block");
            return Some(intent);
        }
    }

    scavenge(raw)
}

/// Last resort: pick out individual `key: value` pairs line by line.
fn scavenge(raw: &str) -> Option<FallbackIntent> {
    let mut intent = FallbackIntent::default();
    let mut found = false;
    for (key, re) in scavenge_regexes() {
        let Some(value) = re
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
        else {
            continue;
        };
        found = true;
        match *key {
            "led" => intent.led = Some(value),
            "color" => intent.color = Some(value),
            "effect" => intent.effect = Some(value),
            "mood" => intent.mood = Some(value),
            "rain" => intent.rain = Some(value),
            "brightness" => intent.brightness = value.parse().ok(),
            "speed" => {
                intent.speed = Some(match value.parse() {
                    Ok(n) => crate::SpeedField::Number(n),
                    Err(_) => crate::SpeedField::Word(value),
                })
            }
            "numleds" => intent.numleds = value.parse().ok(),
            "ledindex" => intent.ledindex = value.parse().ok(),
            "ledrange" => intent.ledrange = Some(value),
            "lcd" => intent.lcd = Some(value),
            "stop" => intent.stop = Some(value.eq_ignore_ascii_case("true")),
            _ => {}
        }
    }
    if found {
        debug!("recovered intent by key scavenging");
        Some(intent)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpeedField;

    #[test]
    fn clean_json_parses() {
        let raw = r#"{"color": "red", "brightness": 80}"#;
        let intent = extract_intent(raw).unwrap();
        assert_eq!(intent.color.as_deref(), Some("red"));
        assert_eq!(intent.brightness, Some(80));
    }

    #[test]
    fn prose_wrapped_json_parses() {
        let raw = r#"Sure! Here is the intent: {"effect": "rainbow"} Hope that helps."#;
        let intent = extract_intent(raw).unwrap();
        assert_eq!(intent.effect.as_deref(), Some("rainbow"));
    }

    #[test]
    fn python_literals_are_repaired() {
        let raw = "{'led': 'on', 'stop': False, 'lcd': None}";
        let intent = extract_intent(raw).unwrap();
        assert_eq!(intent.led.as_deref(), Some("on"));
        assert_eq!(intent.stop, Some(false));
        assert_eq!(intent.lcd, None);
    }

    #[test]
    fn scavenge_recovers_broken_output() {
        let raw = "color: blue\nbrightness: 40\nspeed: fast";
        let intent = extract_intent(raw).unwrap();
        assert_eq!(intent.color.as_deref(), Some("blue"));
        assert_eq!(intent.brightness, Some(40));
        assert_eq!(intent.speed, Some(SpeedField::Word("fast".into())));
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(extract_intent("I have no idea what you mean."), None);
        assert_eq!(extract_intent(""), None);
    }
}
