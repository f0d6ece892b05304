// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error type tests for storeline-rpc.

use serde_json::json;
use storeline_rpc::RpcError;

#[test]
fn test_config_error_display() {
    let err = RpcError::Config("login is empty".to_string());
    assert!(err.to_string().contains("configuration error"));
    assert!(err.to_string().contains("login is empty"));
}

#[test]
fn test_auth_error_display() {
    let err = RpcError::Auth("Access Denied".to_string());
    assert!(err.to_string().contains("authentication failed"));
    assert!(err.to_string().contains("Access Denied"));
}

#[test]
fn test_server_error_display() {
    let err = RpcError::Server {
        code: 400,
        message: "Invalid".to_string(),
        data: Some(json!({"field": "name"})),
    };
    let display = err.to_string();
    assert!(display.contains("server error"));
    assert!(display.contains("400"));
    assert!(display.contains("Invalid"));
}

#[test]
fn test_transport_error_display() {
    let err = RpcError::Transport("connection refused".to_string());
    assert!(err.to_string().contains("transport error"));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_unexpected_response_error_display() {
    let err = RpcError::UnexpectedResponse("no record list".to_string());
    assert!(err.to_string().contains("unexpected response"));
    assert!(err.to_string().contains("no record list"));
}

#[test]
fn test_serialization_error_display() {
    let err = RpcError::Serialization("parse error".to_string());
    assert!(err.to_string().contains("serialization error"));
    assert!(err.to_string().contains("parse error"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RpcError>();
}

#[test]
fn test_error_debug() {
    let err = RpcError::Transport("timed out".to_string());
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("Transport"));
    assert!(debug_str.contains("timed out"));
}

// From implementations

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let rpc_err: RpcError = json_err.into();
    assert!(matches!(rpc_err, RpcError::Serialization(_)));
}

#[test]
fn test_from_url_parse_error() {
    let url_err = "http://".parse::<url::Url>().unwrap_err();
    let rpc_err: RpcError = url_err.into();
    assert!(matches!(rpc_err, RpcError::Config(_)));
}

#[test]
fn test_server_error_data_is_preserved() {
    let err = RpcError::Server {
        code: 200,
        message: "Odoo Server Error".to_string(),
        data: Some(json!({"name": "ValidationError", "arguments": ["Missing name"]})),
    };

    if let RpcError::Server { data, .. } = err {
        let data = data.unwrap();
        assert_eq!(data["name"], "ValidationError");
        assert_eq!(data["arguments"][0], "Missing name");
    } else {
        unreachable!();
    }
}
