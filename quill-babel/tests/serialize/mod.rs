//! HTML → Markdown serialization tests

mod html_import;
mod roundtrip;
