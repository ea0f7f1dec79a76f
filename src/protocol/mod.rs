// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Wire codec: one JSON object per line, one command per request, one
//! response per command. Malformed input degrades to a failure response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded request: `{"type": "<command>", "parameters": {...}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub command_type: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// The uniform response envelope: `{"success": bool, "data"?, "error"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Empty,
    Json(serde_json::Error),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty request line"),
            Self::Json(err) => write!(f, "invalid request JSON: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Strip a UTF-8 BOM and trailing `\r`, then parse one command.
pub fn decode_line(line: &str) -> Result<Command, DecodeError> {
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let line = line.trim();
    if line.is_empty() {
        return Err(DecodeError::Empty);
    }
    serde_json::from_str(line).map_err(DecodeError::Json)
}

/// Encode a response as a single line (no trailing newline).
///
/// Serialization of the envelope cannot fail for values we build, but a
/// defect must still come back on the wire rather than kill the connection.
pub fn encode_response(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        format!("{{\"success\":false,\"error\":\"response encoding failed: {err}\"}}")
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_line, encode_response, Command, DecodeError, Response};
    use serde_json::json;

    #[test]
    fn decodes_a_plain_command_line() {
        let command = decode_line(r#"{"type":"get_document_info"}"#).expect("decode");
        assert_eq!(command.command_type, "get_document_info");
        assert!(command.parameters.is_empty());
    }

    #[test]
    fn decodes_parameters_into_a_map() {
        let command =
            decode_line(r#"{"type":"add_component","parameters":{"type":"add","x":1,"y":2}}"#)
                .expect("decode");
        assert_eq!(command.parameters.get("type"), Some(&json!("add")));
        assert_eq!(command.parameters.get("x"), Some(&json!(1)));
    }

    #[test]
    fn tolerates_bom_and_carriage_return() {
        let line = "\u{feff}{\"type\":\"clear_document\"}\r";
        let command = decode_line(line).expect("decode");
        assert_eq!(command.command_type, "clear_document");
    }

    #[test]
    fn rejects_blank_and_malformed_lines() {
        assert!(matches!(decode_line("   "), Err(DecodeError::Empty)));
        assert!(matches!(decode_line("{nope"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_line(r#"{"parameters":{}}"#), Err(DecodeError::Json(_))));
    }

    #[test]
    fn response_envelope_omits_empty_fields() {
        let ok = encode_response(&Response::ok(json!({"id": "x"})));
        assert_eq!(ok, r#"{"success":true,"data":{"id":"x"}}"#);

        let failure = encode_response(&Response::failure("boom"));
        assert_eq!(failure, r#"{"success":false,"error":"boom"}"#);
    }

    #[test]
    fn command_equality_covers_parameters() {
        let a = decode_line(r#"{"type":"x","parameters":{"k":1}}"#).expect("decode");
        let b = Command {
            command_type: "x".to_owned(),
            parameters: [("k".to_owned(), json!(1))].into_iter().collect(),
        };
        assert_eq!(a, b);
    }
}
