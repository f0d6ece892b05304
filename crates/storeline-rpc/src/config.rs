// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the ERP client.

use std::time::Duration;

use url::Url;

use crate::error::{Result, RpcError};

/// Configuration for [`ErpClient`](crate::ErpClient).
#[derive(Debug, Clone)]
pub struct ErpConfig {
    /// Base URL of the ERP server.
    pub server_url: Url,
    /// Database/tenant name.
    pub database: String,
    /// Login name used for authentication.
    pub login: String,
    /// Password used for authentication.
    pub password: String,
    /// Request timeout applied to every HTTP exchange.
    pub request_timeout: Duration,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8069".parse().unwrap(), // ERP server default port
            database: "storeline".to_string(),
            login: String::new(),
            password: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ErpConfig {
    /// Create a configuration with the given connection parameters.
    pub fn new(
        server_url: &str,
        database: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let server_url = server_url
            .parse()
            .map_err(|e| RpcError::Config(format!("invalid server URL: {}", e)))?;

        Ok(Self {
            server_url,
            database: database.into(),
            login: login.into(),
            password: password.into(),
            ..Self::default()
        })
    }

    /// Create a configuration for localhost development.
    pub fn localhost(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORELINE_ERP_URL`: Server base URL (default: "http://localhost:8069")
    /// - `STORELINE_ERP_DB`: Database name (default: "storeline")
    /// - `STORELINE_ERP_LOGIN`: Login name (required)
    /// - `STORELINE_ERP_PASSWORD`: Password (required)
    /// - `STORELINE_ERP_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let server_url = std::env::var("STORELINE_ERP_URL")
            .unwrap_or_else(|_| "http://localhost:8069".to_string())
            .parse()
            .map_err(|e| RpcError::Config(format!("invalid STORELINE_ERP_URL: {}", e)))?;

        let database =
            std::env::var("STORELINE_ERP_DB").unwrap_or_else(|_| "storeline".to_string());

        let login = std::env::var("STORELINE_ERP_LOGIN")
            .map_err(|_| RpcError::Config("STORELINE_ERP_LOGIN is not set".to_string()))?;

        let password = std::env::var("STORELINE_ERP_PASSWORD")
            .map_err(|_| RpcError::Config("STORELINE_ERP_PASSWORD is not set".to_string()))?;

        let timeout_ms: u64 = std::env::var("STORELINE_ERP_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| RpcError::Config(format!("invalid STORELINE_ERP_TIMEOUT_MS: {}", e)))?;

        Ok(Self {
            server_url,
            database,
            login,
            password,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Check that the configuration can produce well-formed requests.
    ///
    /// Called by `ErpClient::new` so that a missing credential fails fast
    /// instead of surfacing as a malformed request later.
    pub fn validate(&self) -> Result<()> {
        if self.server_url.host_str().is_none() {
            return Err(RpcError::Config("server URL has no host".to_string()));
        }
        if self.database.is_empty() {
            return Err(RpcError::Config("database name is empty".to_string()));
        }
        if self.login.is_empty() {
            return Err(RpcError::Config("login is empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(RpcError::Config("password is empty".to_string()));
        }
        Ok(())
    }

    /// Resolve an endpoint path against the server base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.server_url.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ErpConfig::default();
        assert_eq!(config.server_url.as_str(), "http://localhost:8069/");
        assert_eq!(config.database, "storeline");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_new_parses_url() {
        let config = ErpConfig::new("https://erp.example.com", "prod", "admin", "secret").unwrap();
        assert_eq!(config.server_url.host_str(), Some("erp.example.com"));
        assert_eq!(config.database, "prod");
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let result = ErpConfig::new("not a url", "db", "user", "pw");
        assert!(matches!(result, Err(RpcError::Config(_))));
    }

    #[test]
    fn test_builder_methods() {
        let config = ErpConfig::localhost("admin", "secret")
            .with_database("staging")
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.database, "staging");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let mut config = ErpConfig::localhost("admin", "secret");
        assert!(config.validate().is_ok());

        config.login = String::new();
        assert!(matches!(config.validate(), Err(RpcError::Config(_))));

        let mut config = ErpConfig::localhost("admin", "secret");
        config.password = String::new();
        assert!(matches!(config.validate(), Err(RpcError::Config(_))));

        let config = ErpConfig::localhost("admin", "secret").with_database("");
        assert!(matches!(config.validate(), Err(RpcError::Config(_))));
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = ErpConfig::localhost("admin", "secret");
        let url = config.endpoint("/web/session/authenticate").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8069/web/session/authenticate"
        );
    }
}
