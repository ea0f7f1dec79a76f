// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Deterministic state verification: canonical snapshot, content hash, and
//! assertion predicates.
//!
//! Assertions never fail with an error: a malformed id or an absent node is a
//! `passed: false` result with an explanatory detail, so automated harnesses
//! can distinguish "assertion failed" from "command malfunctioned".

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::doc::GraphDocument;
use crate::model::{NodeId, ObservableValue, SlotDescriptor};
use crate::resolve;

/// One node in the canonical snapshot, slots included, so a snapshot alone
/// reconstructs the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub nickname: String,
    pub x: f64,
    pub y: f64,
    pub input_slots: Vec<SlotDescriptor>,
    pub output_slots: Vec<SlotDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ObservableValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSnapshot {
    pub source_id: String,
    pub source_slot: String,
    pub target_id: String,
    pub target_slot: String,
}

/// Id-sorted, fully deterministic serialization of the live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

/// Walk every node in id-stable order and every input slot's source list.
pub fn export_state(doc: &dyn GraphDocument) -> DocumentSnapshot {
    let mut ids = doc.node_ids();
    ids.sort();

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for id in ids {
        let Some(info) = doc.node_info(id) else {
            continue;
        };
        let input_slots = doc.input_slots(id).unwrap_or_default();
        let output_slots = doc.output_slots(id).unwrap_or_default();

        for slot in &input_slots {
            for source in doc.slot_sources(id, &slot.name).unwrap_or_default() {
                edges.push(EdgeSnapshot {
                    source_id: source.node_id.to_string(),
                    source_slot: source.slot_name,
                    target_id: id.to_string(),
                    target_slot: slot.name.clone(),
                });
            }
        }

        nodes.push(NodeSnapshot {
            id: id.to_string(),
            type_name: info.type_name,
            nickname: info.nickname,
            x: info.x,
            y: info.y,
            input_slots,
            output_slots,
            value: doc.observable_value(id),
        });
    }

    DocumentSnapshot { nodes, edges }
}

/// SHA-256 over the canonical byte string, rendered as lowercase hex.
///
/// Nodes are sorted by id, never by insertion order, so identical documents
/// hash identically no matter how they were built.
pub fn document_hash(doc: &dyn GraphDocument) -> String {
    let mut ids = doc.node_ids();
    ids.sort();

    let mut hasher = Sha256::new();
    for id in ids {
        let Some(info) = doc.node_info(id) else {
            continue;
        };
        hasher.update(id.to_string());
        hasher.update(&info.type_name);
        hasher.update(&info.nickname);

        for slot in doc.input_slots(id).unwrap_or_default() {
            for source in doc.slot_sources(id, &slot.name).unwrap_or_default() {
                hasher.update(source.node_id.to_string());
                hasher.update(&source.slot_name);
                hasher.update(&slot.name);
            }
        }

        if let Some(value) = doc.observable_value(id) {
            hasher.update(value.canonical());
        }
    }

    hex::encode(hasher.finalize())
}

/// Structured pass/fail result with enough detail to diagnose a failure
/// without a follow-up call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub passed: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<u64>,
}

impl Assertion {
    fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
            expected: None,
            actual: None,
        }
    }

    fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
            expected: None,
            actual: None,
        }
    }

    fn counted(mut self, expected: u64, actual: u64) -> Self {
        self.expected = Some(expected);
        self.actual = Some(actual);
        self
    }
}

pub fn assert_node_exists(doc: &dyn GraphDocument, raw_id: &str) -> Assertion {
    let id = match NodeId::from_str(raw_id) {
        Ok(id) => id,
        Err(err) => return Assertion::fail(err.to_string()),
    };
    match doc.node_info(id) {
        Some(info) => Assertion::pass(format!("node {id} exists ({})", info.type_name)),
        None => Assertion::fail(format!("node {id} not found in the document")),
    }
}

pub fn assert_node_count(doc: &dyn GraphDocument, expected: u64) -> Assertion {
    let actual = doc.node_ids().len() as u64;
    let assertion = if actual == expected {
        Assertion::pass(format!("document holds {actual} nodes"))
    } else {
        Assertion::fail(format!("expected {expected} nodes, found {actual}"))
    };
    assertion.counted(expected, actual)
}

pub fn assert_edge_exists(
    doc: &dyn GraphDocument,
    raw_source: &str,
    raw_target: &str,
    source_slot: Option<&str>,
    target_slot: Option<&str>,
) -> Assertion {
    let source = match NodeId::from_str(raw_source) {
        Ok(id) => id,
        Err(err) => return Assertion::fail(err.to_string()),
    };
    let target = match NodeId::from_str(raw_target) {
        Ok(id) => id,
        Err(err) => return Assertion::fail(err.to_string()),
    };
    if doc.node_info(source).is_none() {
        return Assertion::fail(format!("node {source} not found in the document"));
    }
    if doc.node_info(target).is_none() {
        return Assertion::fail(format!("node {target} not found in the document"));
    }

    let input_slots = doc.input_slots(target).unwrap_or_default();
    let candidate_slots = match target_slot {
        Some(name) => {
            let resolved = resolve::resolve_slot_name(name, &input_slots);
            let Some(slot) = input_slots.iter().find(|slot| slot.answers_to(&resolved)) else {
                return Assertion::fail(format!(
                    "slot '{resolved}' not found on node {target}"
                ));
            };
            vec![slot.clone()]
        }
        None => input_slots,
    };

    let wanted_source_slot = source_slot.map(|name| {
        let output_slots = doc.output_slots(source).unwrap_or_default();
        resolve::resolve_slot_name(name, &output_slots)
    });

    for slot in &candidate_slots {
        for reference in doc.slot_sources(target, &slot.name).unwrap_or_default() {
            if reference.node_id != source {
                continue;
            }
            if let Some(wanted) = &wanted_source_slot {
                if !reference.slot_name.eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }
            return Assertion::pass(format!(
                "edge {source}.{} -> {target}.{} exists",
                reference.slot_name, slot.name
            ));
        }
    }

    Assertion::fail(format!("no edge from {source} to {target} matches"))
}
