//! End-to-end rendering tests against a fixed terminal width.

use insta::assert_snapshot;
use serde_json::json;
use standout_table::metrics::{strip_ansi, visible_length};
use standout_table::{
    Cell, ColumnFlags, ColumnType, Filter, FixedWidth, SortDirection, Table, TableFlags,
    TableSpec, NO_SORT,
};

fn people() -> Table {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table
        .add_column("id", "id", ColumnType::Integer, None, ColumnFlags::SORTABLE)
        .add_column("name", "name", ColumnType::String, None, ColumnFlags::SORTABLE)
        .add_data([("id", Cell::from(2)), ("name", Cell::from("bob"))])
        .add_data([("id", Cell::from(1)), ("name", Cell::from("al"))]);
    table
}

#[test]
fn test_sorted_by_id() {
    let mut table = people();
    table.sort_column("id", SortDirection::Ascending).unwrap();
    let output = table.render();

    assert!(output.contains("\x1b[4m▼ id\x1b[0m"));
    assert_snapshot!(strip_ansi(&output), @r"
    ┌──────┬──────┐
    │ ▼ id │ name │
    ├──────┼──────┤
    │    1 │ al   │
    │    2 │ bob  │
    └──────┴──────┘
    ");
}

#[test]
fn test_descending_string_glyph_after_name() {
    let mut table = people();
    table.sort_column("name", SortDirection::Descending).unwrap();
    let output = strip_ansi(&table.render()).into_owned();
    assert!(output.contains("│ name ▲ │"));
    assert!(output.find("bob").unwrap() < output.find("al ").unwrap());
}

#[test]
fn test_filter_scenario() {
    let mut table = people();
    table.add_filter(Filter::new("id", ">", 1).unwrap());
    assert_eq!(table.count(), 1);

    let output = table.render();
    assert!(output.contains("bob"));
    assert!(!output.contains("al "));
}

#[test]
fn test_clearing_sort_removes_glyphs() {
    let mut table = people();
    table.sort_column("id", SortDirection::Descending).unwrap();
    assert!(table.render().contains('▲'));

    table.sort_column(NO_SORT, SortDirection::Ascending).unwrap();
    let output = table.render();
    assert!(!output.contains('▲'));
    assert!(!output.contains('▼'));
    assert!(!output.contains('\x1b'));
}

#[test]
fn test_title_centered() {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table
        .set_title("Team")
        .add_column("name", "name", ColumnType::String, None, ColumnFlags::empty())
        .add_column("age", "age", ColumnType::Integer, None, ColumnFlags::empty())
        .add_data([("name", Cell::from("al")), ("age", Cell::from(30))])
        .add_data([("name", Cell::from("bob")), ("age", Cell::from(4))]);

    assert_snapshot!(table.render(), @r"
    ┌────────────┐
    │    Team    │
    ├──────┬─────┤
    │ name │ age │
    ├──────┼─────┤
    │ al   │  30 │
    │ bob  │   4 │
    └──────┴─────┘
    ");
}

#[test]
fn test_wide_title_widens_last_column() {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table
        .set_title("Quarterly report")
        .add_column("n", "n", ColumnType::Integer, None, ColumnFlags::empty())
        .add_data([("n", 1)]);

    assert_snapshot!(table.render(), @r"
    ┌──────────────────┐
    │ Quarterly report │
    ├──────────────────┤
    │                n │
    ├──────────────────┤
    │                1 │
    └──────────────────┘
    ");
}

#[test]
fn test_title_truncated_to_terminal() {
    let mut table = Table::new().with_terminal(FixedWidth(20));
    table
        .set_title("A very long title for a small table")
        .set_flag(TableFlags::HIDE_COLUMN_HEADERS)
        .add_column("name", "name", ColumnType::String, None, ColumnFlags::empty())
        .add_data([("name", "x")]);

    assert_snapshot!(table.render(), @r"
    ┌──────────────────┐
    │ A very long tit… │
    ├──────────────────┤
    │ x                │
    └──────────────────┘
    ");
}

#[test]
fn test_overflow_truncates_string_column() {
    let mut table = Table::new().with_terminal(FixedWidth(30));
    table
        .add_column("id", "id", ColumnType::Integer, None, ColumnFlags::empty())
        .add_column("desc", "desc", ColumnType::String, None, ColumnFlags::empty())
        .add_data([
            ("id", Cell::from(1)),
            ("desc", Cell::from("a fairly long description that overflows")),
        ])
        .add_data([("id", Cell::from(2)), ("desc", Cell::from("short"))]);

    let output = table.render();
    assert!(output.lines().all(|line| visible_length(line) <= 30));
    assert_snapshot!(output, @r"
    ┌────┬───────────────────────┐
    │ id │ desc                  │
    ├────┼───────────────────────┤
    │  1 │ a fairly long descri… │
    │  2 │ short                 │
    └────┴───────────────────────┘
    ");
}

fn wide_pair(allow_truncate: bool) -> Table {
    let mut table = Table::new().with_terminal(FixedWidth(40));
    table
        .set_allow_truncate_string_columns(allow_truncate)
        .add_column("name", "name", ColumnType::String, None, ColumnFlags::empty())
        .add_column("note", "note", ColumnType::String, None, ColumnFlags::empty())
        .add_data([("name", "a".repeat(30)), ("note", "b".repeat(20))]);
    table
}

#[test]
fn test_widest_column_shrinks_first() {
    let mut table = wide_pair(true);
    assert_snapshot!(table.render(), @r"
    ┌───────────────┬──────────────────────┐
    │ name          │ note                 │
    ├───────────────┼──────────────────────┤
    │ aaaaaaaaaaaa… │ bbbbbbbbbbbbbbbbbbbb │
    └───────────────┴──────────────────────┘
    ");
    assert_eq!(table.layout().width_of("name"), Some(13));
    assert_eq!(table.layout().width_of("note"), Some(20));
}

#[test]
fn test_truncation_disabled_overflows() {
    let mut table = wide_pair(false);
    let output = table.render();
    assert!(!output.contains('…'));
    assert_eq!(table.layout().table_width(), 57);
    assert!(output.contains(&"a".repeat(30)));
}

#[test]
fn test_numeric_columns_never_shrink() {
    let mut table = Table::new().with_terminal(FixedWidth(10));
    table
        .add_column("n", "n", ColumnType::Float, None, ColumnFlags::empty())
        .add_data([("n", 123456789.25)]);
    let output = table.render();
    assert!(output.contains("123456789.25"));
    assert!(!output.contains('…'));
}

#[test]
fn test_wide_characters_and_separators() {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table
        .add_column("city", "city", ColumnType::String, None, ColumnFlags::empty())
        .add_column("pop", "pop", ColumnType::Integer, None, ColumnFlags::empty())
        .add_data([("city", Cell::from("東京")), ("pop", Cell::from(37))])
        .add_separator()
        .add_data([("city", Cell::from("Lyon")), ("pop", Cell::from(2))]);

    assert_eq!(table.count(), 2);
    assert_snapshot!(table.render(), @r"
    ┌──────┬─────┐
    │ city │ pop │
    ├──────┼─────┤
    │ 東京 │  37 │
    ├──────┼─────┤
    │ Lyon │   2 │
    └──────┴─────┘
    ");
}

#[test]
fn test_hidden_column_and_hidden_headers() {
    let mut table = people();
    table.column_mut("id").unwrap().set_flag(ColumnFlags::HIDDEN);
    table.set_flag(TableFlags::HIDE_COLUMN_HEADERS);

    assert_snapshot!(table.render(), @r"
    ┌──────┐
    │ bob  │
    │ al   │
    └──────┘
    ");
}

#[test]
fn test_alignment_flags() {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table
        .add_column("a", "left", ColumnType::Integer, None, ColumnFlags::ALIGN_LEFT)
        .add_column("b", "even", ColumnType::String, None, ColumnFlags::ALIGN_EVEN)
        .add_data([("a", Cell::from(7)), ("b", Cell::from("x"))]);

    let output = table.render();
    assert!(output.contains("│ 7    │  x   │"));
}

#[test]
fn test_natural_sort_of_strings() {
    let mut table = Table::new().with_terminal(FixedWidth(80));
    table.add_column(
        "file",
        "file",
        ColumnType::String,
        Some(SortDirection::Ascending),
        ColumnFlags::SORTABLE,
    );
    table.set_data(["file10", "file2", "file1"]);
    table.render();

    let files: Vec<String> = table
        .rows()
        .map(|row| row.value("file").to_string())
        .collect();
    assert_eq!(files, vec!["file1", "file2", "file10"]);
}

#[test]
fn test_json_rows_from_spec() {
    let spec = TableSpec::from_yaml(
        r#"
columns:
  - { id: user, name: User, type: string }
  - { id: score, name: Score, type: float, sort: desc }
"#,
    )
    .unwrap();
    let mut table = spec.build_with_terminal(FixedWidth(80)).unwrap();
    table.set_data(vec![
        json!({"user": "ann", "score": 3.5}),
        json!({"user": "ben", "score": 9}),
        json!({"user": "cy"}),
    ]);
    table.render();

    let users: Vec<String> = table
        .rows()
        .map(|row| row.value("user").to_string())
        .collect();
    assert_eq!(users, vec!["ben", "ann", "cy"]);
    assert!(table.get_row_with("score", "9").is_some());
}

#[test]
fn test_write_to_buffer() {
    let mut table = people();
    let mut buffer = Vec::new();
    table.write_to(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 6);
}
