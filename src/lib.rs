// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Nodewire: a line-oriented TCP command service for driving a node-graph
//! document.
//!
//! Clients send one JSON command per line and receive one JSON response per
//! line. Commands create and wire graph components through a name resolver
//! and a type-compatibility engine, instantiate keyword-matched patterns,
//! and verify document state with snapshots, hashes, and assertions. All
//! document access is serialized onto a single executor thread.

pub mod doc;
pub mod engine;
pub mod model;
pub mod pattern;
pub mod protocol;
pub mod resolve;
pub mod server;
pub mod service;
pub mod verify;
