//! Inline Markdown grammar: code spans, strong/emphasis and links.
//!
//! A single left-to-right scan with local lookahead. Code spans win over
//! everything (their content is never formatted), `***` resolves to strong
//! wrapping emphasis, `**`/`__` to strong and `*`/`_` to emphasis. Unmatched
//! delimiters stay literal text. Spans nested deeper than
//! [`MAX_NESTING`] are left as literal text.

use crate::ir::nodes::Inline;
use crate::ir::MAX_NESTING;

/// Parse a run of inline Markdown.
pub fn parse_inline(source: &str) -> Vec<Inline> {
    parse_nested(source, 0)
}

fn parse_nested(source: &str, depth: usize) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < source.len() {
        if let Some((inline, consumed)) = match_span(source, pos, depth) {
            if !text.is_empty() {
                out.push(Inline::Text(std::mem::take(&mut text)));
            }
            out.push(inline);
            pos += consumed;
            continue;
        }
        let Some(ch) = source[pos..].chars().next() else {
            break;
        };
        text.push(ch);
        pos += ch.len_utf8();
    }

    if !text.is_empty() {
        out.push(Inline::Text(text));
    }
    out
}

fn match_span(source: &str, pos: usize, depth: usize) -> Option<(Inline, usize)> {
    if depth >= MAX_NESTING {
        return None;
    }
    let rest = &source[pos..];
    match rest.chars().next()? {
        '`' => code_span(rest),
        '*' | '_' => emphasis(source, pos, depth + 1),
        '[' => link(rest, depth + 1),
        _ => None,
    }
}

fn backtick_run(text: &str) -> usize {
    text.len() - text.trim_start_matches('`').len()
}

/// `` `code` `` or ``` ``co`de`` ```; the closing run must match the opening length.
fn code_span(rest: &str) -> Option<(Inline, usize)> {
    let ticks = backtick_run(rest);
    let fence = &rest[..ticks];
    let body = &rest[ticks..];

    let mut search = 0;
    while let Some(found) = body[search..].find(fence) {
        let at = search + found;
        let run = backtick_run(&body[at..]);
        if run != ticks {
            search = at + run;
            continue;
        }
        if at == 0 {
            return None;
        }
        let content = &body[..at];
        let content = if ticks > 1 {
            content
                .strip_prefix(' ')
                .and_then(|c| c.strip_suffix(' '))
                .unwrap_or(content)
        } else {
            content
        };
        return Some((Inline::Code(content.to_string()), ticks * 2 + at));
    }
    None
}

fn emphasis(source: &str, pos: usize, depth: usize) -> Option<(Inline, usize)> {
    let rest = &source[pos..];
    let marker = rest.chars().next()?;
    if marker == '_' && source[..pos].chars().next_back().is_some_and(char::is_alphanumeric) {
        return None;
    }

    let run = rest.len() - rest.trim_start_matches(marker).len();
    if run >= 3 {
        if let Some((inner, consumed)) = delimited(source, pos, &rest[..3]) {
            let nested = Inline::Emphasis(parse_nested(inner, depth));
            return Some((Inline::Strong(vec![nested]), consumed));
        }
    }
    if run >= 2 {
        if let Some((inner, consumed)) = delimited(source, pos, &rest[..2]) {
            return Some((Inline::Strong(parse_nested(inner, depth)), consumed));
        }
    }
    delimited(source, pos, &rest[..1])
        .map(|(inner, consumed)| (Inline::Emphasis(parse_nested(inner, depth)), consumed))
}

/// Find the closing delimiter for an opening `delim` at `pos`.
///
/// Returns the inner text and the number of bytes consumed including both delimiters.
fn delimited<'a>(source: &'a str, pos: usize, delim: &str) -> Option<(&'a str, usize)> {
    let marker = delim.chars().next()?;
    let open = delim.len();
    let body = &source[pos + open..];
    if body.chars().next().map_or(true, char::is_whitespace) {
        return None;
    }

    let mut idx = 0;
    while idx < body.len() {
        let tail = &body[idx..];
        if tail.starts_with('`') {
            if let Some((_, consumed)) = code_span(tail) {
                idx += consumed;
                continue;
            }
        }
        if tail.starts_with(delim) {
            let run = tail.len() - tail.trim_start_matches(marker).len();
            // a double run inside single emphasis belongs to a nested strong span
            if open == 1 && run >= 2 {
                idx += run;
                continue;
            }
            let close_at = idx + run - open;
            let inner = &body[..close_at];
            let closes = !inner.is_empty()
                && !inner.chars().next_back().is_some_and(char::is_whitespace)
                && !(marker == '_'
                    && body[close_at + open..]
                        .chars()
                        .next()
                        .is_some_and(char::is_alphanumeric));
            if closes {
                return Some((inner, open + close_at + open));
            }
            idx += run;
            continue;
        }
        let ch = tail.chars().next()?;
        idx += ch.len_utf8();
    }
    None
}

/// `[label](href)`
fn link(rest: &str, depth: usize) -> Option<(Inline, usize)> {
    let label_end = matching_bracket(rest)?;
    let label = &rest[1..label_end];
    let target = rest[label_end + 1..].strip_prefix('(')?;
    let close = target.find(')')?;
    let href = target[..close].trim();
    let children = parse_nested(label, depth);
    Some((
        Inline::Link {
            href: href.to_string(),
            children,
        },
        label_end + close + 3,
    ))
}

fn matching_bracket(rest: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
