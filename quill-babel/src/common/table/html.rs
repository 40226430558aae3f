//! `TableValue` ⇄ HTML `<table>`.

use super::cell::{CellContent, CellRun};
use super::TableValue;
use crate::error::ConvertError;
use crate::ir::MAX_NESTING;
use crate::formats::html::dom::{
    append, create_element, create_styled, create_text, find_element, parse_html_document,
    serialize_node, tag_name, text_content,
};
use markup5ever_rcdom::{Handle, NodeData};

/// Render a table as an HTML fragment.
pub fn table_to_html(table: &TableValue) -> Result<String, ConvertError> {
    serialize_node(&table_to_dom(table, Some("md-table")))
}

/// Read the first `<table>` found in an HTML string.
pub fn html_to_table(html: &str) -> Option<TableValue> {
    let dom = parse_html_document(html);
    let table = find_element(&dom.document, "table")?;
    table_from_dom(&table)
}

pub(crate) fn table_to_dom(table: &TableValue, class: Option<&str>) -> Handle {
    let element = create_styled("table", class);

    let thead = create_element("thead", vec![]);
    let header_row = create_element("tr", vec![]);
    for header in &table.headers {
        let th = create_element("th", vec![]);
        append_cell(&th, &CellContent::parse(header));
        append(&header_row, th);
    }
    append(&thead, header_row);
    append(&element, thead);

    let tbody = create_element("tbody", vec![]);
    for row in &table.rows {
        let tr = create_element("tr", vec![]);
        for idx in 0..table.headers.len() {
            let td = create_element("td", vec![]);
            let text = row.get(idx).map(String::as_str).unwrap_or_default();
            append_cell(&td, &CellContent::parse(text));
            append(&tr, td);
        }
        append(&tbody, tr);
    }
    append(&element, tbody);

    element
}

fn append_cell(parent: &Handle, content: &CellContent) {
    for run in &content.runs {
        let node = match run {
            CellRun::Plain { text } => create_text(text),
            CellRun::Bold { text } => wrap_text("strong", text),
            CellRun::Italic { text } => wrap_text("em", text),
            CellRun::InlineCode { text } => wrap_text("code", text),
            CellRun::Link { text, href } => {
                let anchor = create_element("a", vec![("href", href)]);
                append(&anchor, create_text(text));
                anchor
            }
            CellRun::LineBreak => create_element("br", vec![]),
        };
        append(parent, node);
    }
}

fn wrap_text(tag: &str, text: &str) -> Handle {
    let element = create_element(tag, vec![]);
    append(&element, create_text(text));
    element
}

/// Rebuild a `TableValue` from a parsed `<table>` element.
///
/// The header is the first row of `<thead>` when present, otherwise the first
/// row of the table. Returns `None` when no header cell has text.
pub(crate) fn table_from_dom(table: &Handle) -> Option<TableValue> {
    let rows = collect_rows(table);

    let header_handle = find_element(table, "thead")
        .and_then(|thead| find_element(&thead, "tr"))
        .or_else(|| rows.first().cloned())?;

    let headers = row_cells(&header_handle);
    if headers.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    let body = rows
        .iter()
        .filter(|row| !std::rc::Rc::ptr_eq(row, &header_handle))
        .map(row_cells)
        .collect();

    Some(TableValue::new(headers, body))
}

fn collect_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    let mut stack: Vec<Handle> = table.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        match tag_name(&node).as_deref() {
            Some("tr") => rows.push(node),
            // nested tables belong to their cells
            Some("table") => {}
            _ => stack.extend(node.children.borrow().iter().rev().cloned()),
        }
    }
    rows
}

fn row_cells(row: &Handle) -> Vec<String> {
    row.children
        .borrow()
        .iter()
        .filter(|child| matches!(tag_name(child).as_deref(), Some("th" | "td")))
        .map(|cell| cell_from_dom(cell).to_markdown().trim().to_string())
        .collect()
}

/// Decode a `<th>`/`<td>` into cell runs.
pub(crate) fn cell_from_dom(cell: &Handle) -> CellContent {
    let mut content = CellContent::default();
    collect_runs(cell, &mut content, 0);
    content
}

fn collect_runs(handle: &Handle, content: &mut CellContent, depth: usize) {
    if depth >= MAX_NESTING {
        content.push_plain(&text_content(handle).replace('\n', " "));
        return;
    }
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            // cells are single-line in Markdown
            let text = contents.borrow().replace('\n', " ");
            content.push_plain(&text);
            continue;
        }
        let Some(tag) = tag_name(child) else {
            continue;
        };
        match tag.as_str() {
            "strong" | "b" => push_formatted(content, child, |text| CellRun::Bold { text }),
            "em" | "i" => push_formatted(content, child, |text| CellRun::Italic { text }),
            "code" => content.push(CellRun::InlineCode {
                text: text_content(child).replace('\n', " "),
            }),
            "a" => {
                let href = crate::formats::html::dom::attr(child, "href").unwrap_or_default();
                content.push(CellRun::Link {
                    text: flat_text(child),
                    href,
                });
            }
            "br" => content.push(CellRun::LineBreak),
            _ => collect_runs(child, content, depth + 1),
        }
    }
}

fn push_formatted(content: &mut CellContent, handle: &Handle, run: impl Fn(String) -> CellRun) {
    let text = flat_text(handle);
    if text.trim().is_empty() {
        content.push_plain(&text);
    } else {
        content.push(run(text));
    }
}

fn flat_text(handle: &Handle) -> String {
    crate::common::whitespace::collapse_whitespace(&text_content(handle))
}
