//! Stable multi-key row ordering.
//!
//! Rules apply in list order; the first non-equal comparison wins, negated
//! for descending rules. Rows equal under every rule keep their pre-sort
//! relative order (the underlying sort is stable).

use std::cmp::Ordering;

use crate::types::{CellValue, Row, SortDirection, SortRule};

/// Natural ordering of stored values: numeric for numbers, lexicographic for
/// strings, `false < true` for booleans. Across types a fixed rank
/// (Null < Bool < Number < Str) keeps the comparison total, so nulls sort
/// first ascending.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::Str(x), CellValue::Str(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Null => 0,
        CellValue::Bool(_) => 1,
        CellValue::Number(_) => 2,
        CellValue::Str(_) => 3,
    }
}

/// Order `indices` (positions into `rows`) by the sort rules, stably.
/// Rules with an empty column are ignored; no active rule leaves the order
/// untouched.
pub fn sort_indices(rows: &[Row], indices: &mut [usize], rules: &[SortRule]) {
    let active: Vec<&SortRule> = rules.iter().filter(|r| !r.column.is_empty()).collect();
    if active.is_empty() {
        return;
    }
    indices.sort_by(|&ia, &ib| match (rows.get(ia), rows.get(ib)) {
        (Some(a), Some(b)) => compare_rows(a, b, &active),
        _ => Ordering::Equal,
    });
}

fn compare_rows(a: &Row, b: &Row, rules: &[&SortRule]) -> Ordering {
    for rule in rules {
        let ord = compare_values(a.get(&rule.column), b.get(&rule.column));
        let ord = match rule.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
