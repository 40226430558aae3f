//! Shared helpers for the integration tests.

use once_cell::sync::Lazy;
use quill_babel::{html_to_markdown, render};
use regex::Regex;

static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#" class="[^"]*""#).unwrap());

/// Remove cosmetic `class` attributes so structure can be compared.
pub fn strip_classes(html: &str) -> String {
    CLASS_ATTR.replace_all(html, "").into_owned()
}

/// Markdown → HTML → Markdown with default options.
pub fn roundtrip(markdown: &str) -> String {
    html_to_markdown(&render(markdown))
}

pub const KITCHEN_SINK: &str = r#"---
title: Doc
tags: [a, b]
---
# Title

Intro with **bold**, *italic* and `code`, plus [a link](https://example.com).

## Section

- one
- two

1. first
2. second

> quoted
> text

| Name | Role |
| --- | --- |
| **Ann** | Lead |
| Bo |

```rust
fn main() {}
```

```chart bar
{"a":1}
```

:::card[Team]{size=small}
Body
:::

---

Last paragraph.
"#;

#[test]
fn test_strip_classes() {
    assert_eq!(
        strip_classes("<p class=\"md-paragraph\">a <code class=\"x y\">b</code></p>"),
        "<p>a <code>b</code></p>"
    );
}
