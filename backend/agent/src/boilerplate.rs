//! Line filter for the filler a model tends to open a continuation with.

use std::sync::LazyLock;

use regex::Regex;

/// Lines opening with an acknowledgement of the instruction.
static ACKNOWLEDGEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(understood|certainly|of course|承知|かしこまりました|了解)").unwrap()
});

/// Lines that apologise anywhere.
static APOLOGY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(sorry|apolog|申し訳|すみません|失礼いたしました)").unwrap()
});

pub fn is_boilerplate(line: &str) -> bool {
    ACKNOWLEDGEMENT_RE.is_match(line) || APOLOGY_RE.is_match(line)
}

/// Drop boilerplate lines from a continuation and trim the remainder.
pub fn clean_continuation(text: &str) -> String {
    text.lines()
        .filter(|line| !is_boilerplate(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
