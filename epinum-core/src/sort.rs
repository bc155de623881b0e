use regex::Regex;
use std::sync::OnceLock;

/// One run of a file name. Digit runs compare numerically, text runs
/// case-insensitively. `Number` is declared first so digit runs order before
/// text runs when two keys disagree on shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Number(u128),
    Text(String),
}

/// Natural sort key for a file name: "ep2" orders before "ep10".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<Segment>);

fn runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"\d+|\D+").expect("static pattern"))
}

/// Split `name` into alternating digit and non-digit runs and build the
/// comparison key.
pub fn natural_sort_key(name: &str) -> SortKey {
    let segments = runs()
        .find_iter(name)
        .map(|run| {
            let text = run.as_str();
            if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                // Digit runs longer than u128 saturate and compare equal
                // among themselves, which is good enough for file names.
                Segment::Number(text.parse().unwrap_or(u128::MAX))
            } else {
                Segment::Text(text.to_lowercase())
            }
        })
        .collect();
    SortKey(segments)
}
