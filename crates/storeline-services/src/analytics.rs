// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sales analytics queries.
//!
//! These go through the client's `call_method` escape hatch: grouped reads
//! have no CRUD equivalent, so the facade builds the `read_group` call shape
//! and passes the grouped rows back unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use storeline_rpc::{datetime_literal, Domain, ErpClient, Result, RpcError};

const MODEL: &str = "sale.report";

/// Time bucket for grouped sales figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// Grouping clause understood by the server.
    pub fn as_group_clause(&self) -> &'static str {
        match self {
            Period::Day => "date:day",
            Period::Week => "date:week",
            Period::Month => "date:month",
        }
    }
}

/// Sales analytics service.
pub struct Analytics {
    client: Arc<ErpClient>,
}

impl Analytics {
    /// Create the service over a shared client.
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// Total sales grouped by time bucket over the given range.
    ///
    /// Rows come back as the server produced them (bucket label, aggregated
    /// totals, record counts); nothing is computed client-side.
    pub async fn sales_by_period(
        &self,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
        period: Period,
    ) -> Result<Vec<Value>> {
        let mut kwargs = Map::new();
        kwargs.insert("domain".to_string(), json!(date_domain(&date_from, &date_to)));
        kwargs.insert("fields".to_string(), json!(["price_total"]));
        kwargs.insert("groupby".to_string(), json!([period.as_group_clause()]));
        kwargs.insert("lazy".to_string(), json!(false));

        let result = self
            .client
            .call_method(MODEL, "read_group", vec![], kwargs)
            .await?;

        group_rows(result)
    }

    /// Best-selling products by revenue over the given range.
    pub async fn top_products(
        &self,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Value>> {
        let mut kwargs = Map::new();
        kwargs.insert("domain".to_string(), json!(date_domain(&date_from, &date_to)));
        kwargs.insert("fields".to_string(), json!(["price_total", "product_uom_qty"]));
        kwargs.insert("groupby".to_string(), json!(["product_id"]));
        kwargs.insert("orderby".to_string(), json!("price_total desc"));
        kwargs.insert("limit".to_string(), json!(limit));
        kwargs.insert("lazy".to_string(), json!(false));

        let result = self
            .client
            .call_method(MODEL, "read_group", vec![], kwargs)
            .await?;

        group_rows(result)
    }

}

fn date_domain(from: &DateTime<Utc>, to: &DateTime<Utc>) -> Domain {
    Domain::new()
        .condition("date", ">=", datetime_literal(from))
        .condition("date", "<", datetime_literal(to))
}

/// read_group answers a list of grouped rows.
fn group_rows(result: Value) -> Result<Vec<Value>> {
    match result {
        Value::Array(rows) => Ok(rows),
        other => Err(RpcError::UnexpectedResponse(format!(
            "read_group result is not a row list: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_group_clauses() {
        assert_eq!(Period::Day.as_group_clause(), "date:day");
        assert_eq!(Period::Week.as_group_clause(), "date:week");
        assert_eq!(Period::Month.as_group_clause(), "date:month");
    }

    #[test]
    fn test_group_rows_rejects_non_list() {
        assert!(matches!(
            group_rows(Value::Bool(true)),
            Err(RpcError::UnexpectedResponse(_))
        ));
    }
}
