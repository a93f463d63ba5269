//! Inline formatter: `**bold**` spans to runs.

use crate::model::InlineRun;
use regex::Regex;
use std::sync::OnceLock;

fn emphasis_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

/// Split text into plain and emphasis runs.
///
/// Pairs are matched left to right without overlap or nesting. Unpaired
/// markers stay in the plain text. Concatenating the run texts gives the
/// input with the matched markers removed.
pub fn format_inline(text: &str) -> Vec<InlineRun> {
    let mut runs: Vec<InlineRun> = Vec::new();
    let mut last = 0;

    for caps in emphasis_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&mut runs, &text[last..whole.start()]);
        runs.push(InlineRun::Emphasis(inner.as_str().to_string()));
        last = whole.end();
    }
    push_plain(&mut runs, &text[last..]);

    runs
}

/// Text with matched emphasis markers removed.
pub fn strip_emphasis(text: &str) -> String {
    emphasis_pattern().replace_all(text, "$1").into_owned()
}

fn push_plain(runs: &mut Vec<InlineRun>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineRun::Plain(prev)) = runs.last_mut() {
        prev.push_str(text);
    } else {
        runs.push(InlineRun::Plain(text.to_string()));
    }
}
