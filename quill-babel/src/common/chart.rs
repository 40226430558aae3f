//! ```` ```chart <type> ```` fences and their HTML placeholders.
//!
//! A chart keeps the exact JSON text it was written with so that a fence
//! survives Markdown → HTML → Markdown byte for byte. Payloads that are not
//! valid JSON are carried as [`InvalidChart`] and come back as a plain code
//! fence.

use crate::common::whitespace::fence_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Info-string keyword that marks a fence as a chart.
pub const CHART_KEYWORD: &str = "chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBlock {
    pub chart_type: String,
    pub payload: Value,
    #[serde(skip)]
    source: String,
}

impl ChartBlock {
    /// Build a chart from an in-memory payload.
    pub fn new(chart_type: impl Into<String>, payload: Value) -> Self {
        let source = payload.to_string();
        Self {
            chart_type: chart_type.into(),
            payload,
            source,
        }
    }

    /// The JSON text as written in the fence.
    pub fn source(&self) -> Cow<'_, str> {
        if self.source.is_empty() {
            Cow::Owned(self.payload.to_string())
        } else {
            Cow::Borrowed(&self.source)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidChart {
    pub chart_type: String,
    pub raw: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Valid(ChartBlock),
    Invalid(InvalidChart),
}

impl ChartData {
    /// Decode the body of a chart fence.
    pub fn from_fence(chart_type: &str, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(payload) => ChartData::Valid(ChartBlock {
                chart_type: chart_type.to_string(),
                payload,
                source: body.to_string(),
            }),
            Err(e) => ChartData::Invalid(InvalidChart {
                chart_type: chart_type.to_string(),
                raw: body.to_string(),
                error: e.to_string(),
            }),
        }
    }

    /// Decode the URI-encoded `data-chart-data` attribute of a placeholder.
    pub fn from_placeholder(chart_type: &str, encoded: &str) -> Self {
        match urlencoding::decode(encoded) {
            Ok(text) => Self::from_fence(chart_type, &text),
            Err(e) => ChartData::Invalid(InvalidChart {
                chart_type: chart_type.to_string(),
                raw: encoded.to_string(),
                error: format!("payload is not valid UTF-8: {e}"),
            }),
        }
    }

    pub fn chart_type(&self) -> &str {
        match self {
            ChartData::Valid(chart) => &chart.chart_type,
            ChartData::Invalid(invalid) => &invalid.chart_type,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ChartData::Valid(_))
    }

    /// Markdown for this chart. Invalid payloads become an untyped code fence.
    pub fn to_markdown(&self) -> String {
        match self {
            ChartData::Valid(chart) => format!(
                "```{CHART_KEYWORD} {}\n{}\n```",
                chart.chart_type,
                chart.source()
            ),
            ChartData::Invalid(invalid) => {
                let fence = fence_for(&invalid.raw);
                format!("{fence}\n{}\n{fence}", invalid.raw)
            }
        }
    }
}

/// Split a fence info string into a chart type, if it names a chart.
pub(crate) fn chart_type_from_info(info: &str) -> Option<&str> {
    let mut words = info.split_whitespace();
    if words.next()? != CHART_KEYWORD {
        return None;
    }
    let chart_type = words.next()?;
    let is_identifier = chart_type
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    (is_identifier && words.next().is_none()).then_some(chart_type)
}

/// URI-encode a payload for a `data-*` attribute.
pub(crate) fn encode_attribute(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Reverse of [`encode_attribute`]; undecodable input is kept as is.
pub(crate) fn decode_attribute(text: &str) -> String {
    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| text.to_string())
}
