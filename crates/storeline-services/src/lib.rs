// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storeline domain services
//!
//! A small, typed vocabulary of retail operations layered on
//! [`storeline_rpc::ErpClient`]: products, sales orders, partners, inventory
//! and sales analytics. Each service fixes the `{model, field list, default
//! filter}` tuple for one domain concept so call sites do not restate it.
//!
//! The services hold no business logic and add no error handling: value bags
//! pass through to the server untouched, records and errors come back
//! unchanged. Construct one shared [`ErpClient`](storeline_rpc::ErpClient)
//! at the composition root and hand each service an `Arc` of it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storeline_rpc::{ErpClient, ErpConfig, SearchOptions};
//! use storeline_services::{Products, SalesOrders};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ErpClient::new(ErpConfig::from_env()?)?);
//!
//! let products = Products::new(client.clone());
//! let orders = SalesOrders::new(client);
//!
//! let catalog = products.list(SearchOptions::new().with_limit(20)).await?;
//! let latest = orders.recent(SearchOptions::default()).await?;
//! println!("{} products, {} recent orders", catalog.len(), latest.len());
//! # Ok(())
//! # }
//! ```

mod analytics;
mod inventory;
mod partners;
mod products;
mod sales;

pub use analytics::{Analytics, Period};
pub use inventory::Inventory;
pub use partners::{PartnerQuery, Partners};
pub use products::{ProductQuery, Products};
pub use sales::{OrderQuery, SalesOrders};
