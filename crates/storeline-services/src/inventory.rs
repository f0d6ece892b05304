// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Inventory (stock level) operations.

use std::sync::Arc;

use serde_json::Value;
use storeline_rpc::{Domain, ErpClient, Result, SearchOptions};

const MODEL: &str = "stock.quant";
const FIELDS: &[&str] = &[
    "product_id",
    "location_id",
    "quantity",
    "reserved_quantity",
];

/// Stock level service.
pub struct Inventory {
    client: Arc<ErpClient>,
}

impl Inventory {
    /// Create the service over a shared client.
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }

    /// List stock levels across all locations.
    pub async fn stock_levels(&self, options: SearchOptions) -> Result<Vec<Value>> {
        self.client
            .search_read(MODEL, Domain::new(), FIELDS, options)
            .await
    }

    /// Stock levels for a single product, across locations.
    pub async fn by_product(&self, product_id: i64) -> Result<Vec<Value>> {
        self.client
            .search_read(
                MODEL,
                Domain::new().condition("product_id", "=", product_id),
                FIELDS,
                SearchOptions::default(),
            )
            .await
    }

    /// Apply the same value bag to every given quant (e.g. counted
    /// quantities during an inventory adjustment). Validation is
    /// server-side.
    pub async fn update(&self, ids: &[i64], values: Value) -> Result<bool> {
        self.client.write(MODEL, ids, values).await
    }
}
