//! Row filtering: free-text search plus the sequential rule fold.
//!
//! Rules combine left to right with each rule's own connective against the
//! cumulative result so far: `[A, (B, or), (C, and)]` evaluates as
//! `(A OR B) AND C`. This sequential fold is deliberate; no operator
//! precedence grouping is attempted, so reordering rules can change the
//! result set.

use std::cmp::Ordering;

use crate::types::{CellValue, Connective, FilterOperator, FilterRule, IsProbe, Row};

/// Indices of the rows that pass `search` and the rule fold, in input order.
///
/// `search_keys` is the set of column keys the free-text search stringifies
/// (every registered column, hidden included).
pub fn matching_indices(
    rows: &[Row],
    rules: &[FilterRule],
    search: &str,
    search_keys: &[String],
) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, rules, search, search_keys))
        .map(|(i, _)| i)
        .collect()
}

/// Whether one row passes the search predicate and the rule fold.
pub fn row_matches(row: &Row, rules: &[FilterRule], search: &str, search_keys: &[String]) -> bool {
    // Search applies first, independently, as an extra AND.
    if !search.is_empty() && !search_matches(row, search, search_keys) {
        return false;
    }

    let mut acc: Option<bool> = None;
    for rule in rules.iter().filter(|r| r.is_active()) {
        let hit = rule_matches(row, rule);
        acc = Some(match acc {
            None => hit,
            Some(prev) => match rule.connective {
                Connective::And => prev && hit,
                Connective::Or => prev || hit,
            },
        });
    }
    acc.unwrap_or(true)
}

/// Case-insensitive containment of `needle` in any searched column's
/// stringified value.
fn search_matches(row: &Row, needle: &str, search_keys: &[String]) -> bool {
    let needle = needle.to_lowercase();
    search_keys
        .iter()
        .any(|key| row.get(key).display().to_lowercase().contains(&needle))
}

/// Evaluate one active rule against a row.
///
/// A missing value fails every operator except `is null`.
fn rule_matches(row: &Row, rule: &FilterRule) -> bool {
    let Some(op) = rule.operator else {
        return false;
    };
    let value = row.get(&rule.column);

    if value.is_null() {
        return op == FilterOperator::Is && IsProbe::parse(&rule.value) == Some(IsProbe::Null);
    }

    match op {
        FilterOperator::Eq => compare(value, &rule.value) == Ordering::Equal,
        FilterOperator::Neq => compare(value, &rule.value) != Ordering::Equal,
        FilterOperator::Lt => compare(value, &rule.value) == Ordering::Less,
        FilterOperator::Lte => compare(value, &rule.value) != Ordering::Greater,
        FilterOperator::Gt => compare(value, &rule.value) == Ordering::Greater,
        FilterOperator::Gte => compare(value, &rule.value) != Ordering::Less,
        FilterOperator::Like => like_matches(&value.display(), &rule.value),
        FilterOperator::ILike => {
            like_matches(&value.display().to_lowercase(), &rule.value.to_lowercase())
        }
        FilterOperator::In => rule
            .value
            .split(',')
            .map(str::trim)
            .any(|item| item == value.display()),
        FilterOperator::Is => match IsProbe::parse(&rule.value) {
            Some(IsProbe::Null) => false,
            Some(IsProbe::NotNull) => true,
            Some(IsProbe::True) => matches!(value, CellValue::Bool(true)),
            Some(IsProbe::False) => matches!(value, CellValue::Bool(false)),
            None => false,
        },
    }
}

/// Ordering of a cell against the rule's value text: numeric when the cell
/// is a number and the text parses as one, lexicographic on the stringified
/// cell otherwise.
fn compare(value: &CellValue, raw: &str) -> Ordering {
    if let CellValue::Number(n) = value {
        if let Ok(rhs) = raw.trim().parse::<f64>() {
            return n.partial_cmp(&rhs).unwrap_or(Ordering::Equal);
        }
    }
    value.display().as_str().cmp(raw)
}

/// Pattern match with only leading/trailing `%` interpreted: `%x%` contains,
/// `x%` starts-with, `%x` ends-with, bare `x` exact. Interior or escaped `%`
/// get no special meaning.
fn like_matches(text: &str, pattern: &str) -> bool {
    let leading = pattern.starts_with('%');
    let trailing = pattern.len() > 1 && pattern.ends_with('%');
    let mut needle = pattern;
    if leading {
        needle = needle.strip_prefix('%').unwrap_or(needle);
    }
    if trailing {
        needle = needle.strip_suffix('%').unwrap_or(needle);
    }
    match (leading, trailing) {
        (true, true) => text.contains(needle),
        (false, true) => text.starts_with(needle),
        (true, false) => text.ends_with(needle),
        (false, false) => text == needle,
    }
}
