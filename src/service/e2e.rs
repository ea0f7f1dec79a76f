// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Full wire-path tests: raw request lines through the codec, the
//! dispatcher, and back to encoded response lines.

use serde_json::Value;

use crate::doc::InMemoryDocument;
use crate::protocol::{decode_line, encode_response};
use crate::service::{build_registry, CommandRegistry, DocumentExecutor, GraphService};

fn registry() -> CommandRegistry {
    let executor = DocumentExecutor::spawn(InMemoryDocument::new("session")).expect("executor");
    build_registry(GraphService::new(executor))
}

async fn roundtrip(registry: &CommandRegistry, line: &str) -> Value {
    let command = decode_line(line).expect("decode");
    let encoded = encode_response(&registry.dispatch(command).await);
    serde_json::from_str(&encoded).expect("encoded response is JSON")
}

#[tokio::test]
async fn a_session_transcript_runs_end_to_end() {
    let registry = registry();

    let reply = roundtrip(
        &registry,
        r#"{"type":"add_component","parameters":{"type":"slider","x":10,"y":20}}"#,
    )
    .await;
    assert_eq!(reply["success"], true);
    assert_eq!(reply["data"]["type"], "Number Slider");
    let slider = reply["data"]["id"].as_str().expect("id").to_owned();

    let reply = roundtrip(
        &registry,
        r#"{"type":"add_component","parameters":{"type":"panel","x":200,"y":20}}"#,
    )
    .await;
    let panel = reply["data"]["id"].as_str().expect("id").to_owned();

    let line = format!(
        r#"{{"type":"connect_components","parameters":{{"sourceId":"{slider}","targetId":"{panel}"}}}}"#
    );
    let reply = roundtrip(&registry, &line).await;
    assert_eq!(reply["success"], true);
    assert_eq!(reply["data"]["targetParam"], "Input");

    let reply = roundtrip(&registry, r#"{"type":"get_document_info"}"#).await;
    assert_eq!(reply["data"]["count"], 2);
}

#[tokio::test]
async fn failures_come_back_as_envelopes_not_disconnects() {
    let registry = registry();

    let reply = roundtrip(&registry, r#"{"type":"no_such_command"}"#).await;
    assert_eq!(reply["success"], false);
    assert_eq!(
        reply["error"],
        "No handler registered for command type 'no_such_command'"
    );

    let reply = roundtrip(
        &registry,
        r#"{"type":"get_component_info","parameters":{"id":"not-a-uuid"}}"#,
    )
    .await;
    assert_eq!(reply["success"], false);
    assert!(reply["error"]
        .as_str()
        .expect("error")
        .contains("malformed node id"));
}

#[tokio::test]
async fn response_lines_never_contain_embedded_newlines() {
    let registry = registry();
    let command = decode_line(r#"{"type":"get_available_patterns"}"#).expect("decode");
    let encoded = encode_response(&registry.dispatch(command).await);
    assert!(!encoded.contains('\n'));
}
