// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use uuid::Uuid;

/// A stable UUID-backed identifier used across the model and protocol surfaces.
///
/// Ids are assigned at node creation and immutable afterwards. The `Ord` impl
/// sorts by the underlying UUID bytes, which matches the lexicographic order
/// of the canonical hyphenated rendering, so id-sorted walks are stable no
/// matter the creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn random() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> Uuid {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.hyphenated())
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Uuid::parse_str(s.trim()).map_err(|_| IdError::Malformed {
            input: s.to_owned(),
        })?;
        Ok(Self::from_uuid(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Malformed { input: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { input } => write!(f, "malformed node id '{input}'"),
        }
    }
}

impl std::error::Error for IdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;
