// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Domain filters and search options.
//!
//! A domain is an ordered sequence of `(field, operator, value)` triplets and
//! prefix logical operators, serialized to the server's array form and passed
//! through unmodified. Clause shape is enforced by construction; contents are
//! never interpreted client-side, so server-side query capabilities this
//! client was not written to know about keep working.

use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Default page size for search/read calls.
pub const DEFAULT_LIMIT: u32 = 80;

/// Prefix logical operator combining the clauses that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Conjunction of the next two clauses.
    And,
    /// Disjunction of the next two clauses.
    Or,
    /// Negation of the next clause.
    Not,
}

impl LogicalOp {
    /// Wire form of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "&",
            LogicalOp::Or => "|",
            LogicalOp::Not => "!",
        }
    }
}

/// One clause of a domain filter.
#[derive(Debug, Clone)]
pub enum DomainClause {
    /// A `(field, operator, value)` triplet, e.g. `("name", "ilike", "chair")`.
    Condition(String, String, Value),
    /// A prefix logical operator.
    Operator(LogicalOp),
}

impl Serialize for DomainClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DomainClause::Condition(field, operator, value) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(field)?;
                seq.serialize_element(operator)?;
                seq.serialize_element(value)?;
                seq.end()
            }
            DomainClause::Operator(op) => serializer.serialize_str(op.as_str()),
        }
    }
}

/// An ordered, opaque query predicate understood by the remote server.
///
/// The empty domain matches every record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Domain(Vec<DomainClause>);

impl Domain {
    /// The empty domain, matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `(field, operator, value)` condition.
    pub fn condition(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.0
            .push(DomainClause::Condition(field.into(), operator.into(), value.into()));
        self
    }

    /// Append a prefix AND operator.
    pub fn and(mut self) -> Self {
        self.0.push(DomainClause::Operator(LogicalOp::And));
        self
    }

    /// Append a prefix OR operator.
    pub fn or(mut self) -> Self {
        self.0.push(DomainClause::Operator(LogicalOp::Or));
        self
    }

    /// Append a prefix NOT operator.
    pub fn not(mut self) -> Self {
        self.0.push(DomainClause::Operator(LogicalOp::Not));
        self
    }

    /// Whether the domain has no clauses.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Format a timestamp in the server's datetime literal form.
pub fn datetime_literal(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Options for search/read calls.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of records returned.
    pub limit: u32,
    /// Number of leading records skipped.
    pub offset: u32,
    /// Server-side sort clause, e.g. `"date_order desc"`. None leaves the
    /// server's default ordering in place.
    pub order: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            order: None,
        }
    }
}

impl SearchOptions {
    /// Create options with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of records returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of leading records skipped.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the sort clause.
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_empty_domain_serializes_to_empty_array() {
        let domain = Domain::new();
        assert_eq!(serde_json::to_value(&domain).unwrap(), json!([]));
    }

    #[test]
    fn test_condition_serializes_as_triplet() {
        let domain = Domain::new().condition("name", "ilike", "chair");
        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["name", "ilike", "chair"]])
        );
    }

    #[test]
    fn test_prefix_operators_serialize_as_strings() {
        let domain = Domain::new()
            .or()
            .condition("state", "=", "sale")
            .condition("state", "=", "done");

        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!(["|", ["state", "=", "sale"], ["state", "=", "done"]])
        );
    }

    #[test]
    fn test_numeric_and_boolean_values_pass_through() {
        let domain = Domain::new()
            .condition("id", "=", 7)
            .condition("active", "=", true);

        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["id", "=", 7], ["active", "=", true]])
        );
    }

    #[test]
    fn test_datetime_literal_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(datetime_literal(&ts), "2025-03-14 09:26:53");
    }

    #[test]
    fn test_search_options_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.limit, DEFAULT_LIMIT);
        assert_eq!(options.offset, 0);
        assert!(options.order.is_none());
    }

    #[test]
    fn test_search_options_builder_chain() {
        let options = SearchOptions::new()
            .with_limit(25)
            .with_offset(50)
            .with_order("date_order desc");

        assert_eq!(options.limit, 25);
        assert_eq!(options.offset, 50);
        assert_eq!(options.order.as_deref(), Some("date_order desc"));
    }
}
