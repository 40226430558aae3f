use quill_babel::{
    html_to_table, parse_table, serialize_table, table_to_html, validate_table, TableValue,
};

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_short_rows_are_padded() {
    let table = parse_table("| A | B |\n|---|---|\n| 1 |\n").expect("table");
    assert_eq!(table.headers, strings(&["A", "B"]));
    assert_eq!(table.rows, vec![strings(&["1", ""])]);
}

#[test]
fn test_long_rows_are_truncated() {
    let table = parse_table("| A |\n|---|\n| 1 | 2 | 3 |").expect("table");
    assert_eq!(table.rows, vec![strings(&["1"])]);
    assert_eq!(serialize_table(&table), "| A |\n| --- |\n| 1 |");
}

#[test]
fn test_header_and_separator_only() {
    let text = "| A | B |\n|---|---|";
    assert_eq!(parse_table(text), None);

    let validation = validate_table(text);
    assert!(!validation.valid);
    assert!(!validation.errors.is_empty());
}

#[test]
fn test_validation_lists_every_problem() {
    let validation = validate_table("|  |  |\n| x |\nno pipes here");
    assert!(!validation.valid);
    assert_eq!(
        validation.errors,
        vec![
            "Header row must contain at least one column name".to_string(),
            "Separator line may only contain '|', '-', ':' and whitespace".to_string(),
            "Row 1 must contain at least one '|'".to_string(),
        ]
    );
}

#[test]
fn test_parse_is_more_permissive_than_validate() {
    let text = "| A |\nnot a separator\n| 1 |";
    assert!(parse_table(text).is_some());
    assert!(!validate_table(text).valid);
}

#[test]
fn test_literal_pipe_cannot_be_escaped() {
    let table = parse_table("| a | b |\n|---|---|\n| x \\| y | z |").expect("table");
    assert_eq!(table.rows, vec![strings(&["x \\", "y"])]);
}

#[test]
fn test_html_conversion_keeps_rich_cells() {
    let table = TableValue::new(
        strings(&["**Name**", "Notes"]),
        vec![strings(&["*Ann*", "see [docs](https://d.io)<br>and `cfg`"])],
    );
    let html = table_to_html(&table).expect("html");
    assert!(html.contains("<th><strong>Name</strong></th>"));
    assert!(html.contains("<td><em>Ann</em></td>"));
    assert!(html.contains("<a href=\"https://d.io\">docs</a><br>and <code>cfg</code>"));
    assert_eq!(html_to_table(&html), Some(table));
}

#[test]
fn test_html_table_from_foreign_markup() {
    let html = "<div><table>\n  <tr><th>Key</th><th>Value</th></tr>\n  <tr><td><b>a</b></td><td>1\n2</td></tr>\n</table></div>";
    let table = html_to_table(html).expect("table");
    assert_eq!(table.headers, strings(&["Key", "Value"]));
    assert_eq!(table.rows, vec![strings(&["**a**", "1 2"])]);
}
