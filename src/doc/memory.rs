// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! In-memory reference host backed by the static type catalog.

use std::collections::BTreeMap;

use crate::model::{catalog, Node, NodeId, ObservableValue, SlotDescriptor, SourceRef};

use super::{GraphDocument, NodeInfo};

/// A complete [`GraphDocument`] implementation used by the shipped binary and
/// by tests. Nodes are keyed by id in a `BTreeMap`, so host order is already
/// id-sorted.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    name: String,
    path: Option<String>,
    nodes: BTreeMap<NodeId, Node>,
}

impl InMemoryDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            nodes: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Adopt a node under a caller-chosen id. Host adapters load existing
    /// documents whose ids predate this service; tests use this to build two
    /// documents with identical ids in different insertion orders.
    pub fn create_node_with_id(&mut self, id: NodeId, type_name: &str, x: f64, y: f64) -> bool {
        let Some(component) = catalog::find(type_name) else {
            return false;
        };
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Node::from_type(id, component, x, y));
        true
    }

    fn strip_references_to(&mut self, removed: NodeId) {
        for node in self.nodes.values_mut() {
            for slot in node.inputs_mut() {
                slot.retain_sources(|source| source.node_id != removed);
            }
        }
    }
}

impl GraphDocument for InMemoryDocument {
    fn document_name(&self) -> String {
        self.name.clone()
    }

    fn document_path(&self) -> Option<String> {
        self.path.clone()
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn node_info(&self, id: NodeId) -> Option<NodeInfo> {
        let node = self.nodes.get(&id)?;
        let (x, y) = node.position();
        Some(NodeInfo {
            id,
            type_name: node.type_name().to_owned(),
            nickname: node.nickname().to_owned(),
            x,
            y,
        })
    }

    fn create_node(&mut self, type_name: &str, x: f64, y: f64) -> Option<NodeId> {
        let component = catalog::find(type_name)?;
        let id = NodeId::random();
        self.nodes.insert(id, Node::from_type(id, component, x, y));
        Some(id)
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(&id).is_none() {
            return false;
        }
        self.strip_references_to(id);
        true
    }

    fn input_slots(&self, id: NodeId) -> Option<Vec<SlotDescriptor>> {
        let node = self.nodes.get(&id)?;
        Some(node.inputs().iter().map(|slot| slot.descriptor().clone()).collect())
    }

    fn output_slots(&self, id: NodeId) -> Option<Vec<SlotDescriptor>> {
        let node = self.nodes.get(&id)?;
        Some(node.outputs().to_vec())
    }

    fn slot_sources(&self, id: NodeId, slot_name: &str) -> Option<Vec<SourceRef>> {
        let node = self.nodes.get(&id)?;
        let slot = node.inputs().iter().find(|slot| slot.descriptor().name == slot_name)?;
        Some(slot.sources().to_vec())
    }

    fn replace_slot_sources(&mut self, id: NodeId, slot_name: &str, sources: &[SourceRef]) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let Some(slot) = node
            .inputs_mut()
            .iter_mut()
            .find(|slot| slot.descriptor().name == slot_name)
        else {
            return false;
        };
        slot.replace_sources(sources);
        true
    }

    fn observable_value(&self, id: NodeId) -> Option<ObservableValue> {
        self.nodes.get(&id)?.observable().cloned()
    }

    fn set_observable_value(&mut self, id: NodeId, value: ObservableValue) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.set_observable(value);
        true
    }

    fn is_persistent(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(Node::is_persistent)
    }

    fn set_persistent(&mut self, id: NodeId, persistent: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_persistent(persistent);
        }
    }

    fn clear_non_persistent(&mut self) -> usize {
        let doomed = self
            .nodes
            .values()
            .filter(|node| !node.is_persistent())
            .map(Node::id)
            .collect::<Vec<_>>();
        for id in &doomed {
            self.nodes.remove(id);
            self.strip_references_to(*id);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryDocument;
    use crate::doc::GraphDocument;
    use crate::model::{NodeId, SourceRef};

    #[test]
    fn create_rejects_unknown_type() {
        let mut doc = InMemoryDocument::new("test");
        assert!(doc.create_node("Bogus Component", 0.0, 0.0).is_none());
        assert!(doc.node_ids().is_empty());
    }

    #[test]
    fn remove_strips_dangling_references() {
        let mut doc = InMemoryDocument::new("test");
        let slider = doc.create_node("Number Slider", 0.0, 0.0).expect("slider");
        let add = doc.create_node("Addition", 100.0, 0.0).expect("addition");
        assert!(doc.replace_slot_sources(add, "A", &[SourceRef::new(slider, "Value")]));

        assert!(doc.remove_node(slider));
        assert_eq!(doc.slot_sources(add, "A").expect("slot"), Vec::new());
    }

    #[test]
    fn clear_spares_persistent_nodes() {
        let mut doc = InMemoryDocument::new("test");
        let keep = doc.create_node("Panel", 0.0, 0.0).expect("panel");
        doc.create_node("Number Slider", 0.0, 0.0).expect("slider");
        doc.create_node("Number Slider", 0.0, 50.0).expect("slider");
        doc.set_persistent(keep, true);

        assert_eq!(doc.clear_non_persistent(), 2);
        assert_eq!(doc.node_ids(), vec![keep]);
    }

    #[test]
    fn adopting_a_taken_id_fails() {
        let mut doc = InMemoryDocument::new("test");
        let id = NodeId::random();
        assert!(doc.create_node_with_id(id, "Panel", 0.0, 0.0));
        assert!(!doc.create_node_with_id(id, "Panel", 0.0, 0.0));
    }
}
