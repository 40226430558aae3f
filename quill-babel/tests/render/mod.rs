//! Markdown → HTML rendering tests

mod blocks;
mod custom_blocks;
