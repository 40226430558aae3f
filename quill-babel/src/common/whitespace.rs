//! Blank-line normalization and code fences for generated Markdown.

/// Collapse runs of blank lines to a single blank line and trim the result.
///
/// Lines inside fenced code blocks are kept as they are.
pub fn normalize_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut fence: Option<usize> = None;
    let mut blank_run = 0;

    for line in text.lines() {
        let ticks = backtick_run(line.trim_start());
        let toggles = match fence {
            None => ticks >= 3,
            Some(open) => ticks >= open && line.trim().len() == ticks,
        };
        if toggles {
            fence = if fence.is_some() { None } else { Some(ticks) };
            blank_run = 0;
            out.push(line);
            continue;
        }
        if fence.is_none() && line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
            out.push("");
            continue;
        }
        blank_run = 0;
        out.push(line);
    }

    out.join("\n").trim().to_string()
}

/// Backtick fence that no line of `body` can close: one longer than the
/// longest backtick-only line, and never shorter than three.
pub fn fence_for(body: &str) -> String {
    let longest = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c == '`'))
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn backtick_run(text: &str) -> usize {
    text.len() - text.trim_start_matches('`').len()
}

/// Replace every whitespace run (newlines included) with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
