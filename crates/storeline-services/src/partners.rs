// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Partner (customer/vendor) operations.

use std::sync::Arc;

use serde_json::Value;
use storeline_rpc::{Domain, ErpClient, Result, SearchOptions};

const MODEL: &str = "res.partner";
const FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "city",
    "country_id",
    "customer_rank",
];

/// Partner directory service.
pub struct Partners {
    client: Arc<ErpClient>,
}

impl Partners {
    /// Create the service over a shared client.
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// List partners with the given paging options, name-ordered unless the
    /// options say otherwise.
    pub async fn list(&self, options: SearchOptions) -> Result<Vec<Value>> {
        let options = match options.order {
            Some(_) => options,
            None => options.with_order("name asc"),
        };
        self.client
            .search_read(MODEL, Domain::new(), FIELDS, options)
            .await
    }

    /// Fetch one partner by id.
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

    /// Search partners matching the query. Zero matches is an empty vec.
    pub async fn search(&self, query: PartnerQuery) -> Result<Vec<Value>> {
        let mut options = SearchOptions::new().with_order("name asc");
        if let Some(limit) = query.limit {
            options = options.with_limit(limit);
        }
        self.client
            .search_read(MODEL, query.to_domain(), FIELDS, options)
            .await
    }

    /// Create a partner from a raw value bag. Validation is server-side.
    pub async fn create(&self, values: Value) -> Result<i64> {
        self.client.create(MODEL, values).await
    }

    /// Apply the same value bag to every given partner.
    pub async fn update(&self, ids: &[i64], values: Value) -> Result<bool> {
        self.client.write(MODEL, ids, values).await
    }
}

/// Filter for partner searches.
#[derive(Debug, Clone, Default)]
pub struct PartnerQuery {
    /// Case-insensitive pattern matched against the partner name.
    pub name_contains: Option<String>,
    /// Only partners that have bought at least once.
    pub customers_only: bool,
    /// Maximum number of records returned.
    pub limit: Option<u32>,
}

impl PartnerQuery {
    /// Create an empty query matching every partner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match names containing the given pattern (case-insensitive).
    pub fn with_name_contains(mut self, pattern: impl Into<String>) -> Self {
        self.name_contains = Some(pattern.into());
        self
    }

    /// Restrict to partners with a positive customer rank.
    pub fn customers_only(mut self) -> Self {
        self.customers_only = true;
        self
    }

    /// Cap the number of records returned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_domain(&self) -> Domain {
        let mut domain = Domain::new();
        if let Some(pattern) = &self.name_contains {
            domain = domain.condition("name", "ilike", pattern.as_str());
        }
        if self.customers_only {
            domain = domain.condition("customer_rank", ">", 0);
        }
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customers_only_adds_rank_condition() {
        let domain = PartnerQuery::new()
            .with_name_contains("acme")
            .customers_only()
            .to_domain();

        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["name", "ilike", "acme"], ["customer_rank", ">", 0]])
        );
    }
}
