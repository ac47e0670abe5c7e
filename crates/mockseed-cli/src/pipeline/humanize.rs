use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    wrote: Regex,
    linked: Regex,
    error: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(Patterns {
                wrote: Regex::new(
                    r"^\s*Wrote (\d+) (teams|venues|users|events|players) to (.+?)\s*$",
                )
                .ok()?,
                linked: Regex::new(r"^\s*Wrote (\d+) event-team rows to (.+?)\s*$").ok()?,
                error: Regex::new(r"(?i)\berror\b").ok()?,
            })
        })
        .as_ref()
}

/// Rewrite a generator output line for the run log.
///
/// Summary lines become friendlier sentences and lines mentioning an error
/// get a marker; anything else passes through unchanged.
pub fn humanize_log_line(line: &str) -> String {
    let Some(patterns) = patterns() else {
        return line.to_string();
    };

    if let Some(caps) = patterns.wrote.captures(line) {
        return format!(
            "✔ Successfully generated {} mock {}. Saved to {}",
            &caps[1], &caps[2], &caps[3]
        );
    }
    if let Some(caps) = patterns.linked.captures(line) {
        return format!(
            "Linked {} teams to events. Join table saved to {}",
            &caps[1], &caps[2]
        );
    }
    if patterns.error.is_match(line) {
        return format!("❌ {line}");
    }
    line.to_string()
}
