// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storeline RPC client
//!
//! JSON-RPC 2.0 client for Odoo-style ERP backends. This crate owns the
//! protocol-facing concerns: session handling, call framing and error
//! unwrapping. Domain-specific vocabularies (products, orders, partners)
//! live in `storeline-services` on top of it.
//!
//! # Architecture
//!
//! Every data operation is a `{jsonrpc, method: "call", params, id}` envelope
//! POSTed to a server endpoint. The client authenticates implicitly before
//! the first data call, caches the numeric user id for the rest of its
//! lifetime, and unwraps each response envelope into either the result
//! payload or a typed error. Domain filters pass through opaque; the client
//! validates their shape by construction and never interprets them.
//!
//! # Example
//!
//! ```no_run
//! use storeline_rpc::{Domain, ErpClient, ErpConfig, SearchOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ErpConfig::new("https://erp.example.com", "prod", "admin", "secret")?;
//! let client = ErpClient::new(config)?;
//!
//! // First data call authenticates transparently.
//! let records = client
//!     .search_read(
//!         "product.product",
//!         Domain::new().condition("list_price", ">", 100),
//!         &["name", "list_price"],
//!         SearchOptions::new().with_limit(10),
//!     )
//!     .await?;
//! println!("{} products", records.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod domain;
mod error;
mod protocol;

pub use client::ErpClient;
pub use config::ErpConfig;
pub use domain::{datetime_literal, Domain, DomainClause, LogicalOp, SearchOptions, DEFAULT_LIMIT};
pub use error::{Result, RpcError};
pub use protocol::{RpcFault, RpcRequest, RpcResponse, CALL_METHOD, JSONRPC_VERSION};
