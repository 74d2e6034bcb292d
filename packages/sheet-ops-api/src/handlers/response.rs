//! JSON envelope applied to every endpoint reply.
//!
//! Successful replies wrap their payload as `{"success": true, "data": ...}`;
//! failures carry `{"success": false, "error": {"status": ..., "message": ...}}`
//! so clients can branch on one boolean regardless of endpoint.

use serde::Serialize;
use serde_json::json;

/// Serializes a payload under the success envelope.
pub fn success_body<T: Serialize>(data: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&json!({
        "success": true,
        "data": data,
    }))
}

/// Serializes an error envelope carrying the HTTP status and message.
///
/// Infallible: a serializer failure degrades to a hand-built JSON
/// payload rather than an empty body.
pub fn error_body(status: u16, message: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "success": false,
        "error": {
            "status": status,
            "message": message,
        },
    }))
    .unwrap_or_else(|_| {
        b"{\"success\":false,\"error\":{\"status\":500,\"message\":\"Failed to serialize error\"}}"
            .to_vec()
    })
}
