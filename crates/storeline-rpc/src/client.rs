// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! ErpClient — the remote procedure client for the ERP server.

use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::ErpConfig;
use crate::domain::{Domain, SearchOptions};
use crate::error::{Result, RpcError};
use crate::protocol::{RpcRequest, RpcResponse};

/// Authentication endpoint.
const SESSION_AUTHENTICATE: &str = "/web/session/authenticate";
/// Search-and-read dataset endpoint.
const DATASET_SEARCH_READ: &str = "/web/dataset/search_read";
/// Generic model-method dataset endpoint.
const DATASET_CALL_KW: &str = "/web/dataset/call_kw";

/// Client issuing typed calls against the ERP server's JSON-RPC API.
///
/// The client hides envelope construction and session management from
/// callers: every data operation authenticates implicitly on first use and
/// reuses the cached session afterwards. One instance (typically behind an
/// `Arc`) serves all call sites in a process; construct and inject it at the
/// composition root rather than hiding it behind a module-level singleton,
/// so multiple independent sessions stay possible.
///
/// The client performs no retries and configures no per-call timeout beyond
/// the transport timeout in [`ErpConfig`]; recovery policy belongs to the
/// caller.
pub struct ErpClient {
    http: reqwest::Client,
    config: ErpConfig,
    /// Cached authenticated user id. `None` means not yet authenticated.
    session: RwLock<Option<i64>>,
}

impl ErpClient {
    /// Create a client with the given configuration.
    ///
    /// The configuration is validated here so that a missing credential or
    /// unusable URL fails fast instead of producing malformed requests on
    /// every later call.
    pub fn new(config: ErpConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RpcError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session: RwLock::new(None),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ErpConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ErpConfig {
        &self.config
    }

    /// Whether a session is currently cached.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// POST one call envelope and unwrap the response payload.
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value> {
        let url = self.config.endpoint(endpoint)?;
        let request = RpcRequest::call(params);

        debug!(endpoint, id = request.id, "Sending call envelope");

        let response = self.http.post(url).json(&request).send().await?;
        let response = response.error_for_status()?;
        let envelope: RpcResponse = response.json().await?;

        envelope.into_result()
    }

    /// Guard ensuring a data call never runs without a valid session.
    ///
    /// Centralizes the implicit-authentication policy for every operation.
    async fn ensure_session(&self) -> Result<i64> {
        if let Some(uid) = *self.session.read().await {
            return Ok(uid);
        }
        self.authenticate().await
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Authenticate against the server, returning the numeric user id.
    ///
    /// Idempotent: once a session exists, the cached id is returned without a
    /// network round-trip. Concurrent first calls may both reach the
    /// authentication endpoint; the server treats authentication as
    /// idempotent, so the redundant round-trip is an accepted inefficiency
    /// rather than deduplicated here.
    #[instrument(skip(self), fields(db = %self.config.database, login = %self.config.login))]
    pub async fn authenticate(&self) -> Result<i64> {
        if let Some(uid) = *self.session.read().await {
            return Ok(uid);
        }

        let params = json!({
            "db": self.config.database,
            "login": self.config.login,
            "password": self.config.password,
        });

        let result = self
            .call(SESSION_AUTHENTICATE, params)
            .await
            .map_err(|err| match err {
                // Credentials rejected and endpoint unreachable both surface
                // as authentication errors, distinct from per-call failures.
                RpcError::Server { message, .. } => RpcError::Auth(message),
                RpcError::Transport(msg) => {
                    RpcError::Auth(format!("authentication endpoint unreachable: {}", msg))
                }
                other => other,
            })?;

        // The server answers a bare uid, or a session object carrying one.
        // A falsy result means the credentials were not accepted.
        let uid = result
            .as_i64()
            .or_else(|| result.get("uid").and_then(Value::as_i64));

        let uid = match uid {
            Some(uid) if uid > 0 => uid,
            _ => return Err(RpcError::Auth("server rejected credentials".to_string())),
        };

        *self.session.write().await = Some(uid);
        info!(uid, "Authenticated");

        Ok(uid)
    }

    /// Drop the cached session.
    ///
    /// Never fails; calling without a session is a no-op. The next operation
    /// re-authenticates transparently.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if self.session.write().await.take().is_some() {
            info!("Session cleared");
        }
    }

    // =========================================================================
    // Data operations
    // =========================================================================

    /// Search the given model and read the matching records.
    ///
    /// An empty `fields` slice requests the server's default field set; a
    /// non-empty one restricts the returned attributes. Zero matches yields
    /// an empty vec, not an error.
    #[instrument(skip(self, domain, options), fields(model = %model))]
    pub async fn search_read(
        &self,
        model: &str,
        domain: Domain,
        fields: &[&str],
        options: SearchOptions,
    ) -> Result<Vec<Value>> {
        self.ensure_session().await?;

        let params = json!({
            "model": model,
            "domain": domain,
            "fields": fields,
            "limit": options.limit,
            "offset": options.offset,
            "sort": options.order.as_deref().unwrap_or(""),
        });

        let result = self.call(DATASET_SEARCH_READ, params).await?;

        // The endpoint answers either a bare record list or a paging object
        // wrapping one.
        let records = match result {
            Value::Array(records) => records,
            Value::Object(mut wrapper) => match wrapper.remove("records") {
                Some(Value::Array(records)) => records,
                _ => {
                    return Err(RpcError::UnexpectedResponse(
                        "search_read result carries no record list".to_string(),
                    ))
                }
            },
            other => {
                return Err(RpcError::UnexpectedResponse(format!(
                    "search_read result is not a record list: {}",
                    other
                )))
            }
        };

        debug!(count = records.len(), "search_read returned");
        Ok(records)
    }

    /// Create a record from the given value bag, returning the new record id.
    ///
    /// Validation is entirely server-side; missing or malformed required
    /// fields surface as the server's own error.
    #[instrument(skip(self, values), fields(model = %model))]
    pub async fn create(&self, model: &str, values: Value) -> Result<i64> {
        let result = self
            .call_method(model, "create", vec![values], Map::new())
            .await?;

        result.as_i64().ok_or_else(|| {
            RpcError::UnexpectedResponse(format!("create returned a non-numeric id: {}", result))
        })
    }

    /// Apply the same value set to every record in `ids`.
    ///
    /// Atomicity across the id set is whatever the server provides; a single
    /// error response fails the whole call and no partial-success bookkeeping
    /// happens client-side.
    #[instrument(skip(self, values), fields(model = %model, count = ids.len()))]
    pub async fn write(&self, model: &str, ids: &[i64], values: Value) -> Result<bool> {
        let result = self
            .call_method(model, "write", vec![json!(ids), values], Map::new())
            .await?;

        result.as_bool().ok_or_else(|| {
            RpcError::UnexpectedResponse(format!("write returned a non-boolean: {}", result))
        })
    }

    /// Delete the given records.
    #[instrument(skip(self), fields(model = %model, count = ids.len()))]
    pub async fn unlink(&self, model: &str, ids: &[i64]) -> Result<bool> {
        let result = self
            .call_method(model, "unlink", vec![json!(ids)], Map::new())
            .await?;

        result.as_bool().ok_or_else(|| {
            RpcError::UnexpectedResponse(format!("unlink returned a non-boolean: {}", result))
        })
    }

    /// Invoke an arbitrary named method on a model with positional and
    /// keyword arguments.
    ///
    /// The escape hatch for operations the CRUD wrappers cannot express:
    /// workflow transitions, grouped reads, custom reports.
    #[instrument(skip(self, args, kwargs), fields(model = %model, method = %method))]
    pub async fn call_method(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value> {
        self.ensure_session().await?;

        let params = json!({
            "model": model,
            "method": method,
            "args": args,
            "kwargs": kwargs,
        });

        self.call(DATASET_CALL_KW, params).await
    }
}
