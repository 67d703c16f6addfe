//! Tests for sort stability and pagination: page counts, page resets, and
//! idempotent slicing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridstate::paginate::paginate;
use gridstate::{CellValue, ColumnSpec, GridView, Row, SortRule};

fn row(k: f64, i: f64) -> Row {
    [
        ("k".to_string(), CellValue::Number(k)),
        ("i".to_string(), CellValue::Number(i)),
    ]
    .into_iter()
    .collect()
}

fn view_with(count: usize) -> GridView {
    let mut view = GridView::new(&[ColumnSpec::new("k", "K"), ColumnSpec::new("i", "I")]).unwrap();
    #[allow(clippy::cast_precision_loss)]
    view.load_rows((0..count).map(|i| row(0.0, i as f64)).collect());
    view
}

#[test]
fn test_sort_is_stable_on_equal_keys() {
    let mut view = GridView::new(&[ColumnSpec::new("k", "K"), ColumnSpec::new("i", "I")]).unwrap();
    view.load_rows(vec![row(1.0, 0.0), row(1.0, 1.0)]);
    view.add_sort_rule(SortRule::asc("k"));
    let order: Vec<String> = view
        .page_rows()
        .iter()
        .map(|r| r.get("i").display())
        .collect();
    assert_eq!(order, vec!["0", "1"]);
}

#[test]
fn test_pagination_idempotence() {
    let rows: Vec<u32> = (0..7).collect();
    let (once, _) = paginate(&rows, 0, 10);
    let (twice, _) = paginate(once, 0, 10);
    assert_eq!(once, twice);
}

#[test]
fn test_twenty_five_rows_three_pages_end_to_end() {
    let mut view = view_with(25);

    let numbers = view.pagination();
    assert_eq!(numbers.page_size, 10);
    assert_eq!(numbers.total_rows, 25);
    assert_eq!(numbers.total_pages, 3);

    // Page 2 (0-indexed) holds rows 21-25: five of them.
    view.set_page(2);
    let last_page: Vec<String> = view
        .page_rows()
        .iter()
        .map(|r| r.get("i").display())
        .collect();
    assert_eq!(last_page, vec!["20", "21", "22", "23", "24"]);

    // Switching the page size resets to page 0 and fits everything.
    assert!(view.set_page_size(25));
    let numbers = view.pagination();
    assert_eq!(numbers.page, 0);
    assert_eq!(numbers.total_pages, 1);
    assert_eq!(view.page_rows().len(), 25);
}

#[test]
fn test_out_of_range_page_yields_empty_slice() {
    let rows: Vec<u32> = (0..25).collect();
    let (slice, total) = paginate(&rows, 10, 10);
    assert_eq!(total, 3);
    assert!(slice.is_empty());
}

#[test]
fn test_page_size_outside_choices_is_rejected() {
    let mut view = view_with(25);
    assert!(!view.set_page_size(7));
    assert_eq!(view.pagination().page_size, 10);
}

#[test]
fn test_filter_change_resets_page() {
    let mut view = view_with(50);
    view.set_page(4);
    assert_eq!(view.pagination().page, 4);
    view.add_filter_rule(gridstate::FilterRule::blank());
    assert_eq!(view.pagination().page, 0);
}
