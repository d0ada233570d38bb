//! Text normalization ahead of segmentation and extraction.

use crate::lexicon;

/// Normalize one raw utterance.
///
/// Lowercases, strips filler phrases by whole-phrase substring removal,
/// rewrites known typos and shorthand, drops `%` next to digits, clamps
/// embedded `brightness N` / `speed N` values in place, and collapses
/// whitespace. Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_lowercase();

    for filler in lexicon::FILLER_PHRASES {
        if text.contains(filler) {
            text = text.replace(filler, "");
        }
    }

    for (wrong, right) in lexicon::CORRECTIONS {
        if text.contains(wrong) {
            text = text.replace(wrong, right);
        }
    }

    text = lexicon::percent_regex().replace_all(&text, "$1").into_owned();

    text = clamp_keyword(&text, lexicon::brightness_clamp_regex(), "brightness", 100);
    text = clamp_keyword(&text, lexicon::speed_clamp_regex(), "speed", 1000);

    lexicon::whitespace_regex()
        .replace_all(&text, " ")
        .trim()
        .to_string()
}

/// Rewrite `keyword[:=] N` so that N never exceeds `max`. Unparseable digit
/// runs (absurdly long numbers) are treated as over the limit.
fn clamp_keyword(text: &str, re: &regex::Regex, keyword: &str, max: u64) -> String {
    re.replace_all(text, |caps: &regex::Captures| {
        let value = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(u64::MAX);
        format!("{} {}", keyword, value.min(max))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Turn ON LED  "), "turn on led");
    }

    #[test]
    fn strips_fillers() {
        assert_eq!(normalize("can you turn on led please"), "turn on led");
    }

    #[test]
    fn rewrites_shorthand() {
        assert_eq!(normalize("centerwave"), "center wave");
        assert_eq!(normalize("go super fast"), "go speed 10");
        assert_eq!(normalize("full bright"), "maximum brightness");
    }

    #[test]
    fn strips_percent_and_clamps() {
        assert_eq!(normalize("set brightness to 80%"), "set brightness to 80");
        assert_eq!(normalize("brightness 500"), "brightness 100");
        assert_eq!(normalize("speed 5000"), "speed 1000");
        assert_eq!(normalize("speed=20"), "speed 20");
        assert_eq!(normalize("brightness 99999999999999999999"), "brightness 100");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("led   on\tand\tred"), "led on and red");
    }

    #[test]
    fn idempotent_over_samples() {
        let samples = [
            "Turn on the LED and make it RED, please",
            "set brightness to 150%",
            "super fast centerwave",
            "full bright",
            "fastest partyflash now",
            "speed 5000 and brightness 200",
            "nothing interesting happened",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
