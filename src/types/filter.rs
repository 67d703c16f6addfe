use serde::{Deserialize, Serialize};

/// Logical connective joining a rule to the cumulative result of prior rules.
///
/// Rules fold left to right; each rule's own connective combines its predicate
/// with the running result. There is no precedence grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Connective {
    #[default]
    And,
    Or,
}

/// Comparison operator of a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    /// Equality (numeric when the cell is a number and the value parses).
    Eq,
    /// Inequality.
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Pattern match, case-sensitive; only leading/trailing `%` interpreted.
    Like,
    /// Pattern match, case-insensitive.
    #[serde(rename = "ilike")]
    ILike,
    /// Membership in a comma-separated value list.
    In,
    /// Null/boolean probe: `null`, `not null`, `true`, `false`.
    Is,
}

/// Parsed argument of an `is` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsProbe {
    Null,
    NotNull,
    True,
    False,
}

impl IsProbe {
    /// Parse the rule value of an `is` operator. Unknown text makes the rule
    /// inert rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "null" => Some(IsProbe::Null),
            "not null" => Some(IsProbe::NotNull),
            "true" => Some(IsProbe::True),
            "false" => Some(IsProbe::False),
            _ => None,
        }
    }
}

/// One declarative filter rule.
///
/// Incomplete rules (no column, no operator, or empty value) are inert: they
/// are skipped by evaluation entirely and never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// Column key the rule tests; empty while the user is still building it.
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
    /// User-entered value text (comma-separated for `in`).
    pub value: String,
    /// How this rule combines with the cumulative result of prior rules.
    pub connective: Connective,
}

impl FilterRule {
    /// A complete rule.
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
        connective: Connective,
    ) -> Self {
        Self {
            column: column.into(),
            operator: Some(operator),
            value: value.into(),
            connective,
        }
    }

    /// An empty rule as added by the "add filter" control, to be filled in.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether the rule participates in evaluation.
    pub fn is_active(&self) -> bool {
        let Some(op) = self.operator else {
            return false;
        };
        if self.column.is_empty() || self.value.is_empty() {
            return false;
        }
        // An `is` probe with unrecognized text stays inert.
        op != FilterOperator::Is || IsProbe::parse(&self.value).is_some()
    }
}
