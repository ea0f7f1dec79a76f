// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Slot metadata: the named, typed connection points declared by a node type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// The data family a slot carries. Compatibility between families is decided
/// by the mutation engine's matrix, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataFamily {
    Number,
    Text,
    Boolean,
    Point,
    Vector,
    Plane,
    Curve,
    Geometry,
    Generic,
}

impl DataFamily {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
            Self::Point => "Point",
            Self::Vector => "Vector",
            Self::Plane => "Plane",
            Self::Curve => "Curve",
            Self::Geometry => "Geometry",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for DataFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    Single,
    List,
    Tree,
}

/// Read-only slot metadata fetched from the type catalog at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDescriptor {
    pub name: String,
    pub nickname: String,
    pub family: DataFamily,
    pub multiplicity: Multiplicity,
    pub optional: bool,
}

impl SlotDescriptor {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>, family: DataFamily) -> Self {
        Self {
            name: name.into(),
            nickname: nickname.into(),
            family,
            multiplicity: Multiplicity::Single,
            optional: false,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Case-insensitive match against the slot's name or nickname.
    pub fn answers_to(&self, label: &str) -> bool {
        self.name.eq_ignore_ascii_case(label) || self.nickname.eq_ignore_ascii_case(label)
    }
}

/// A reference from a target input slot to a source node's output slot.
/// Edges are owned by the target side as an ordered list of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub node_id: NodeId,
    pub slot_name: String,
}

impl SourceRef {
    pub fn new(node_id: NodeId, slot_name: impl Into<String>) -> Self {
        Self {
            node_id,
            slot_name: slot_name.into(),
        }
    }
}

/// A node-specific observable value: a slider's number, a panel's text, a
/// toggle's state. Serialized untagged so it reads as a plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservableValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl ObservableValue {
    /// Canonical rendering used by the verification hash. Tagged per variant
    /// so `Number(1.0)` and `Text("1")` never collide.
    pub fn canonical(&self) -> String {
        match self {
            Self::Number(value) => format!("n:{value}"),
            Self::Text(value) => format!("t:{value}"),
            Self::Boolean(value) => format!("b:{value}"),
        }
    }
}
