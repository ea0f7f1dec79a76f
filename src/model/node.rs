// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

use smallvec::SmallVec;

use super::catalog::ComponentType;
use super::ids::NodeId;
use super::slot::{ObservableValue, SlotDescriptor, SourceRef};

/// An input slot instance: the declared descriptor plus its current source
/// references. Most slots are single-assignment, so the inline capacity is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSlot {
    descriptor: SlotDescriptor,
    sources: SmallVec<[SourceRef; 1]>,
}

impl InputSlot {
    pub fn new(descriptor: SlotDescriptor) -> Self {
        Self {
            descriptor,
            sources: SmallVec::new(),
        }
    }

    pub fn descriptor(&self) -> &SlotDescriptor {
        &self.descriptor
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    pub fn replace_sources(&mut self, sources: &[SourceRef]) {
        self.sources.clear();
        self.sources.extend(sources.iter().cloned());
    }

    // SmallVec::retain hands out `&mut`, unlike Vec::retain.
    pub fn retain_sources(&mut self, keep: impl FnMut(&mut SourceRef) -> bool) {
        self.sources.retain(keep);
    }
}

/// A typed processing unit in the graph document.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    type_name: String,
    nickname: String,
    position: (f64, f64),
    inputs: Vec<InputSlot>,
    outputs: Vec<SlotDescriptor>,
    observable: Option<ObservableValue>,
    persistent: bool,
}

impl Node {
    /// Instantiate a node of the given catalog type at a position. The type
    /// name is fixed at creation; the nickname defaults to the descriptor's.
    pub fn from_type(id: NodeId, component: &ComponentType, x: f64, y: f64) -> Self {
        Self {
            id,
            type_name: component.name.clone(),
            nickname: component.nickname.clone(),
            position: (x, y),
            inputs: component.inputs.iter().cloned().map(InputSlot::new).collect(),
            outputs: component.outputs.clone(),
            observable: component.observable.default_value(),
            persistent: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [InputSlot] {
        &mut self.inputs
    }

    pub fn outputs(&self) -> &[SlotDescriptor] {
        &self.outputs
    }

    pub fn observable(&self) -> Option<&ObservableValue> {
        self.observable.as_ref()
    }

    pub fn set_observable(&mut self, value: ObservableValue) {
        self.observable = Some(value);
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn set_persistent(&mut self, persistent: bool) {
        self.persistent = persistent;
    }
}
