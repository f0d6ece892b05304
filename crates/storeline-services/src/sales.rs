// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sales order operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use storeline_rpc::{datetime_literal, Domain, ErpClient, Result, SearchOptions};

const MODEL: &str = "sale.order";
const FIELDS: &[&str] = &[
    "name",
    "partner_id",
    "date_order",
    "amount_total",
    "state",
];

/// Sales order service.
pub struct SalesOrders {
    client: Arc<ErpClient>,
}

impl SalesOrders {
    /// Create the service over a shared client.
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// List orders, most recent first, with the given paging options.
    pub async fn recent(&self, options: SearchOptions) -> Result<Vec<Value>> {
        let options = match options.order {
            Some(_) => options,
            None => options.with_order("date_order desc"),
        };
        self.client
            .search_read(MODEL, Domain::new(), FIELDS, options)
            .await
    }

    /// Fetch one order by id.
    pub async fn by_id(&self, id: i64) -> Result<Option<Value>> {
        let records = self
            .client
            .search_read(
                MODEL,
                Domain::new().condition("id", "=", id),
                FIELDS,
                SearchOptions::new().with_limit(1),
            )
            .await?;
        Ok(records.into_iter().next())
    }

    /// Search orders matching the query. Zero matches is an empty vec.
    pub async fn search(&self, query: OrderQuery) -> Result<Vec<Value>> {
        let mut options = SearchOptions::new().with_order("date_order desc");
        if let Some(limit) = query.limit {
            options = options.with_limit(limit);
        }
        self.client
            .search_read(MODEL, query.to_domain(), FIELDS, options)
            .await
    }

    /// Create an order from a raw value bag. Validation is server-side.
    pub async fn create(&self, values: Value) -> Result<i64> {
        self.client.create(MODEL, values).await
    }

    /// Apply the same value bag to every given order.
    pub async fn update(&self, ids: &[i64], values: Value) -> Result<bool> {
        self.client.write(MODEL, ids, values).await
    }

    /// Confirm a draft order (workflow transition, no CRUD equivalent).
    pub async fn confirm(&self, id: i64) -> Result<Value> {
        self.client
            .call_method(MODEL, "action_confirm", vec![Value::from(vec![id])], Default::default())
            .await
    }
}

/// Filter for sales order searches.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Only orders placed at or after this instant.
    pub date_from: Option<DateTime<Utc>>,
    /// Only orders placed strictly before this instant.
    pub date_to: Option<DateTime<Utc>>,
    /// Workflow state, e.g. "sale" or "draft".
    pub state: Option<String>,
    /// Maximum number of records returned.
    pub limit: Option<u32>,
}

impl OrderQuery {
    /// Create an empty query matching every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep orders placed at or after the given instant.
    pub fn with_date_from(mut self, from: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Keep orders placed strictly before the given instant.
    pub fn with_date_to(mut self, to: DateTime<Utc>) -> Self {
        self.date_to = Some(to);
        self
    }

    /// Keep orders in the given workflow state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Cap the number of records returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_domain(&self) -> Domain {
        let mut domain = Domain::new();
        if let Some(from) = &self.date_from {
            domain = domain.condition("date_order", ">=", datetime_literal(from));
        }
        if let Some(to) = &self.date_to {
            domain = domain.condition("date_order", "<", datetime_literal(to));
        }
        if let Some(state) = &self.state {
            domain = domain.condition("state", "=", state.as_str());
        }
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_date_range_uses_server_datetime_literals() {
        let from = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let domain = OrderQuery::new()
            .with_date_from(from)
            .with_date_to(to)
            .with_state("sale")
            .to_domain();

        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([
                ["date_order", ">=", "2025-01-01 00:00:00"],
                ["date_order", "<", "2025-02-01 00:00:00"],
                ["state", "=", "sale"]
            ])
        );
    }
}
