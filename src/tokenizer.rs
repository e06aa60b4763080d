//! Splitting of an input line into an [`Argv`].

use crate::argv::Argv;
use crate::config::Limits;
use log::warn;

fn is_separator(ch: char) -> bool {
    ch == ' ' || ch == '\n'
}

/// Cut `s` after `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Splits `line` on runs of spaces and newlines.
///
/// Words are copied out, so the caller may reuse `line` right away. Input
/// exceeding `limits` is truncated rather than rejected. A blank line yields an
/// empty [`Argv`].
pub fn tokenize(line: &str, limits: &Limits) -> Argv {
    let visible = truncate_chars(line, limits.max_line_len);
    if visible.len() < line.len() {
        warn!("input line truncated to {} characters", limits.max_line_len);
    }

    let mut words = Vec::new();
    for word in visible.split(is_separator).filter(|w| !w.is_empty()) {
        if words.len() == limits.max_args {
            warn!("too many arguments, keeping the first {}", limits.max_args);
            break;
        }
        let kept = truncate_chars(word, limits.max_arg_len);
        if kept.len() < word.len() {
            warn!("argument truncated to {} characters", limits.max_arg_len);
        }
        words.push(kept.to_string());
    }
    Argv::new(words)
}
