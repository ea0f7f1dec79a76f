// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Graph mutation engine.
//!
//! Operations resolve names best-effort (see `resolve`), then perform the
//! authoritative existence check against the live document. Every operation
//! is a single request/response unit; no cross-request state lives here.

pub mod compat;

use std::fmt;

use crate::doc::GraphDocument;
use crate::model::{catalog, DataFamily, NodeId, SlotDescriptor, SourceRef};
use crate::resolve;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    NodeNotFound(NodeId),
    SlotNotFound { node: NodeId, slot: String },
    UnknownNodeType(String),
    AmbiguousSource { node: NodeId, outputs: usize },
    NoAvailableSlot { node: NodeId },
    IncompatibleTypes { source: DataFamily, target: DataFamily },
    PersistentNode(NodeId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {id} not found in the document"),
            Self::SlotNotFound { node, slot } => {
                write!(f, "slot '{slot}' not found on node {node}")
            }
            Self::UnknownNodeType(name) => write!(f, "unknown component type '{name}'"),
            Self::AmbiguousSource { node, outputs } => write!(
                f,
                "source slot not specified and node {node} has {outputs} output slots"
            ),
            Self::NoAvailableSlot { node } => {
                write!(f, "every lettered input slot on node {node} is occupied")
            }
            Self::IncompatibleTypes { source, target } => write!(
                f,
                "incompatible families: {source} source cannot feed {target} target"
            ),
            Self::PersistentNode(id) => {
                write!(f, "node {id} is persistent infrastructure and cannot be removed")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// A caller-supplied slot reference: a resolvable name or a zero-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRef {
    Name(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSpec {
    pub source: NodeId,
    pub target: NodeId,
    pub source_slot: Option<SlotRef>,
    pub target_slot: Option<SlotRef>,
}

/// The slot pair a connection actually resolved to. Callers need this because
/// auto-routing may have chosen a slot they did not name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConnection {
    pub source_slot: String,
    pub target_slot: String,
    pub source_family: DataFamily,
    pub target_family: DataFamily,
}

/// Resolve a type name and instantiate a node in the live document.
/// Returns the new id and the canonical type name actually used.
pub fn create_node(
    doc: &mut dyn GraphDocument,
    type_name: &str,
    x: f64,
    y: f64,
) -> Result<(NodeId, String), EngineError> {
    let resolved = resolve::resolve_component_type(type_name);
    let component = catalog::find(&resolved)
        .ok_or_else(|| EngineError::UnknownNodeType(type_name.to_owned()))?;
    let id = doc
        .create_node(&component.name, x, y)
        .ok_or_else(|| EngineError::UnknownNodeType(type_name.to_owned()))?;
    Ok((id, component.name.clone()))
}

/// Wire a source output slot into a target input slot (replace semantics).
pub fn connect(
    doc: &mut dyn GraphDocument,
    spec: &ConnectionSpec,
) -> Result<ResolvedConnection, EngineError> {
    let resolved = resolve_connection(&*doc, spec)?;
    let source_ref = SourceRef::new(spec.source, resolved.source_slot.clone());
    // Clear-then-append happens atomically inside the host.
    if !doc.replace_slot_sources(spec.target, &resolved.target_slot, &[source_ref]) {
        return Err(EngineError::SlotNotFound {
            node: spec.target,
            slot: resolved.target_slot.clone(),
        });
    }
    Ok(resolved)
}

/// Run the full connection resolution and compatibility check without
/// touching the document.
pub fn validate_connection(
    doc: &dyn GraphDocument,
    spec: &ConnectionSpec,
) -> Result<ResolvedConnection, EngineError> {
    resolve_connection(doc, spec)
}

pub fn remove_node(doc: &mut dyn GraphDocument, id: NodeId) -> Result<(), EngineError> {
    if doc.node_info(id).is_none() {
        return Err(EngineError::NodeNotFound(id));
    }
    if doc.is_persistent(id) {
        return Err(EngineError::PersistentNode(id));
    }
    doc.remove_node(id);
    Ok(())
}

/// Remove every node the host does not flag as persistent infrastructure.
pub fn clear_document(doc: &mut dyn GraphDocument) -> usize {
    doc.clear_non_persistent()
}

fn resolve_connection(
    doc: &dyn GraphDocument,
    spec: &ConnectionSpec,
) -> Result<ResolvedConnection, EngineError> {
    if doc.node_info(spec.source).is_none() {
        return Err(EngineError::NodeNotFound(spec.source));
    }
    let target_info = doc
        .node_info(spec.target)
        .ok_or(EngineError::NodeNotFound(spec.target))?;

    let target_slots = doc
        .input_slots(spec.target)
        .ok_or(EngineError::NodeNotFound(spec.target))?;
    let target_slot = match &spec.target_slot {
        Some(slot_ref) => pick_slot(spec.target, &target_slots, slot_ref)?,
        None => {
            let aggregation =
                catalog::find(&target_info.type_name).is_some_and(|c| c.aggregation);
            if aggregation {
                first_free_slot(doc, spec.target, &target_slots)?
            } else {
                target_slots.first().cloned().ok_or(EngineError::SlotNotFound {
                    node: spec.target,
                    slot: "(no input slots)".to_owned(),
                })?
            }
        }
    };

    let source_slots = doc
        .output_slots(spec.source)
        .ok_or(EngineError::NodeNotFound(spec.source))?;
    let source_slot = match &spec.source_slot {
        Some(slot_ref) => pick_slot(spec.source, &source_slots, slot_ref)?,
        None => match source_slots.len() {
            1 => source_slots[0].clone(),
            0 => {
                return Err(EngineError::SlotNotFound {
                    node: spec.source,
                    slot: "(no output slots)".to_owned(),
                })
            }
            outputs => {
                return Err(EngineError::AmbiguousSource {
                    node: spec.source,
                    outputs,
                })
            }
        },
    };

    if !compat::compatible(source_slot.family, target_slot.family) {
        return Err(EngineError::IncompatibleTypes {
            source: source_slot.family,
            target: target_slot.family,
        });
    }

    Ok(ResolvedConnection {
        source_slot: source_slot.name,
        target_slot: target_slot.name,
        source_family: source_slot.family,
        target_family: target_slot.family,
    })
}

fn pick_slot(
    node: NodeId,
    slots: &[SlotDescriptor],
    slot_ref: &SlotRef,
) -> Result<SlotDescriptor, EngineError> {
    match slot_ref {
        SlotRef::Index(index) => slots.get(*index).cloned().ok_or(EngineError::SlotNotFound {
            node,
            slot: format!("index {index}"),
        }),
        SlotRef::Name(name) => {
            // Selection resolves against the live slots only; the shorthand
            // alias table is a naming concern, not a selection one.
            let resolved = resolve::select_slot_name(name, slots);
            slots
                .iter()
                .find(|slot| slot.answers_to(&resolved))
                .cloned()
                .ok_or(EngineError::SlotNotFound {
                    node,
                    slot: resolved,
                })
        }
    }
}

/// Scan the fixed lettered slots in order and pick the first one with no
/// current source reference.
fn first_free_slot(
    doc: &dyn GraphDocument,
    node: NodeId,
    slots: &[SlotDescriptor],
) -> Result<SlotDescriptor, EngineError> {
    for slot in slots {
        let occupied = doc
            .slot_sources(node, &slot.name)
            .is_some_and(|sources| !sources.is_empty());
        if !occupied {
            return Ok(slot.clone());
        }
    }
    Err(EngineError::NoAvailableSlot { node })
}

#[cfg(test)]
mod tests;
