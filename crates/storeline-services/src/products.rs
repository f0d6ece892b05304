// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Product catalog operations.

use std::sync::Arc;

use serde_json::Value;
use storeline_rpc::{Domain, ErpClient, Result, SearchOptions};

const MODEL: &str = "product.product";
const FIELDS: &[&str] = &[
    "name",
    "default_code",
    "list_price",
    "standard_price",
    "qty_available",
    "categ_id",
];

/// Product catalog service.
///
/// Fixes the model and field tuple for product reads so call sites do not
/// restate it. Everything else passes through to the RPC client unchanged:
/// no validation, no derived computation, no caching.
pub struct Products {
    client: Arc<ErpClient>,
}

impl Products {
    /// Create the service over a shared client.
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// List products with the given paging options, name-ordered unless the
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

    /// Fetch one product by id.
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

    /// Search products matching the query. Zero matches is an empty vec.
    pub async fn search(&self, query: ProductQuery) -> Result<Vec<Value>> {
        let mut options = SearchOptions::new().with_order("name asc");
        if let Some(limit) = query.limit {
            options = options.with_limit(limit);
        }
        self.client
            .search_read(MODEL, query.to_domain(), FIELDS, options)
            .await
    }

    /// Create a product from a raw value bag. Validation is server-side.
    pub async fn create(&self, values: Value) -> Result<i64> {
        self.client.create(MODEL, values).await
    }

    /// Apply the same value bag to every given product.
    pub async fn update(&self, ids: &[i64], values: Value) -> Result<bool> {
        self.client.write(MODEL, ids, values).await
    }
}

/// Filter for product searches.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Case-insensitive pattern matched against the product name.
    pub name_contains: Option<String>,
    /// Exact internal reference (default_code).
    pub reference: Option<String>,
    /// Maximum number of records returned.
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Create an empty query matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match names containing the given pattern (case-insensitive).
    pub fn with_name_contains(mut self, pattern: impl Into<String>) -> Self {
        self.name_contains = Some(pattern.into());
        self
    }

    /// Match the exact internal reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
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
        if let Some(reference) = &self.reference {
            domain = domain.condition("default_code", "=", reference.as_str());
        }
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_query_matches_everything() {
        let domain = ProductQuery::new().to_domain();
        assert!(domain.is_empty());
    }

    #[test]
    fn test_query_conditions_are_conjunctive_triplets() {
        let domain = ProductQuery::new()
            .with_name_contains("chair")
            .with_reference("FURN-0269")
            .to_domain();

        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([
                ["name", "ilike", "chair"],
                ["default_code", "=", "FURN-0269"]
            ])
        );
    }
}
