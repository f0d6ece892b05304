// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! JSON-RPC 2.0 envelope types for the ERP wire protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RpcError};

/// Protocol version tag sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method name carried by every data operation envelope.
pub const CALL_METHOD: &str = "call";

/// Request envelope posted to the server.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Protocol version tag, always "2.0".
    pub jsonrpc: &'static str,
    /// Envelope method, always "call" for data operations.
    pub method: &'static str,
    /// Parameter bag (model, domain, fields, method arguments, ...).
    pub params: Value,
    /// Numeric request id pairing this request with its response.
    pub id: u64,
}

impl RpcRequest {
    /// Wrap a parameter bag in a call envelope with a fresh request id.
    pub fn call(params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: CALL_METHOD,
            params,
            id: next_request_id(),
        }
    }
}

/// Ids only pair a request with its response over the synchronous
/// one-request-one-response exchange; collisions are tolerated.
fn next_request_id() -> u64 {
    rand::random_range(1..1_000_000_000)
}

/// Deserialize a value that was present in the document, keeping null as
/// `Some(Value::Null)`. The field's `default` covers the absent case.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Response envelope returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Protocol version tag echoed by the server.
    #[serde(default)]
    pub jsonrpc: String,
    /// Request id echoed by the server.
    #[serde(default)]
    pub id: Option<Value>,
    /// Success payload, if the call succeeded. A present-but-null result is
    /// still a payload (void methods answer null), distinct from an absent
    /// result key.
    #[serde(default, deserialize_with = "present_value")]
    pub result: Option<Value>,
    /// Error object, if the call failed server-side.
    #[serde(default)]
    pub error: Option<RpcFault>,
}

/// Error object carried by a failed response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFault {
    /// Numeric error code reported by the server.
    pub code: i64,
    /// Human-readable message reported by the server.
    pub message: String,
    /// Optional structured detail (traceback, validation info, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcResponse {
    /// Unwrap the envelope into its single payload.
    ///
    /// A well-formed envelope carries exactly one of result/error; anything
    /// else is a protocol violation.
    pub fn into_result(self) -> Result<Value> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(fault)) => Err(RpcError::Server {
                code: fault.code,
                message: fault.message,
                data: fault.data,
            }),
            (Some(_), Some(_)) => Err(RpcError::UnexpectedResponse(
                "envelope carries both result and error".to_string(),
            )),
            (None, None) => Err(RpcError::UnexpectedResponse(
                "envelope carries neither result nor error".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_shape() {
        let request = RpcRequest::call(json!({"db": "demo"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "call");
        assert_eq!(value["params"]["db"], "demo");
        assert!(value["id"].is_u64());
    }

    #[test]
    fn test_into_result_success() {
        let response: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": 7})).unwrap();

        assert_eq!(response.into_result().unwrap(), json!(7));
    }

    #[test]
    fn test_into_result_error() {
        let response: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 400, "message": "Invalid", "data": {"name": "ValidationError"}}
        }))
        .unwrap();

        match response.into_result().unwrap_err() {
            RpcError::Server {
                code,
                message,
                data,
            } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid");
                assert_eq!(data.unwrap()["name"], "ValidationError");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result_empty_envelope() {
        let response: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();

        assert!(matches!(
            response.into_result(),
            Err(RpcError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_null_result_is_a_payload() {
        let response: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();

        assert_eq!(response.into_result().unwrap(), Value::Null);
    }
}
