// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! The document access boundary.
//!
//! The live node-graph document is an external resource; this core holds no
//! long-lived copy of it. Every operation re-reads and re-writes through
//! [`GraphDocument`]. The in-memory reference host lives in [`memory`]; real
//! host adapters implement the same trait outside this crate.

mod memory;

pub use memory::InMemoryDocument;

use crate::model::{NodeId, ObservableValue, SlotDescriptor, SourceRef};

/// Position and identity of a live node, as reported by the host document.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub type_name: String,
    pub nickname: String,
    pub x: f64,
    pub y: f64,
}

/// Minimal surface the host document must provide.
///
/// All methods are synchronous; callers marshal onto the document executor
/// (see `service::executor`) so the host only ever sees one logical caller.
pub trait GraphDocument: Send {
    fn document_name(&self) -> String;

    fn document_path(&self) -> Option<String>;

    /// Every live node id, in the host's own order. Callers that need
    /// determinism sort the result themselves.
    fn node_ids(&self) -> Vec<NodeId>;

    fn node_info(&self, id: NodeId) -> Option<NodeInfo>;

    /// Instantiate a node of a catalog type at a position. `None` when the
    /// host does not know the (already resolved) type name.
    fn create_node(&mut self, type_name: &str, x: f64, y: f64) -> Option<NodeId>;

    /// Remove a node and strip every source reference pointing at it.
    /// Returns `false` when the node does not exist.
    fn remove_node(&mut self, id: NodeId) -> bool;

    fn input_slots(&self, id: NodeId) -> Option<Vec<SlotDescriptor>>;

    fn output_slots(&self, id: NodeId) -> Option<Vec<SlotDescriptor>>;

    /// Current source references on a named input slot, in wiring order.
    fn slot_sources(&self, id: NodeId, slot_name: &str) -> Option<Vec<SourceRef>>;

    /// Atomically replace a slot's source references (clear, then append).
    /// Returns `false` when the node or slot does not exist.
    fn replace_slot_sources(&mut self, id: NodeId, slot_name: &str, sources: &[SourceRef]) -> bool;

    fn observable_value(&self, id: NodeId) -> Option<ObservableValue>;

    fn set_observable_value(&mut self, id: NodeId, value: ObservableValue) -> bool;

    /// Whether the host marks this node as persistent infrastructure, exempt
    /// from `clear_non_persistent`.
    fn is_persistent(&self, id: NodeId) -> bool;

    fn set_persistent(&mut self, id: NodeId, persistent: bool);

    /// Remove every non-persistent node; returns how many were removed.
    fn clear_non_persistent(&mut self) -> usize;
}
