// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Graph data model: typed ids, slot metadata, nodes, and the static
//! component-type catalog.

pub mod catalog;
mod ids;
mod node;
mod slot;

pub use ids::{Id, IdError, NodeId};
pub use node::{InputSlot, Node};
pub use slot::{DataFamily, Multiplicity, ObservableValue, SlotDescriptor, SourceRef};
