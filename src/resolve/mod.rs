// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Name resolution for component types and slot names.
//!
//! Resolution is best-effort, not authoritative: if nothing matches, the
//! original input is returned unchanged and the mutation engine performs the
//! authoritative existence check afterwards.
//!
//! The ladder, first match wins:
//! 1. exact alias-table lookup on the normalized input,
//! 2. exact case-insensitive match against the candidate names,
//! 3. single unambiguous substring match,
//! 4. single unambiguous prefix match,
//! 5. shortest candidate among multiple substring matches,
//! 6. the input itself.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::model::{catalog, SlotDescriptor};

const COMPONENT_ALIASES: &[(&str, &str)] = &[
    ("add", "Addition"),
    ("plus", "Addition"),
    ("sum", "Addition"),
    ("sub", "Subtraction"),
    ("minus", "Subtraction"),
    ("mul", "Multiplication"),
    ("times", "Multiplication"),
    ("product", "Multiplication"),
    ("div", "Division"),
    ("slider", "Number Slider"),
    ("numslider", "Number Slider"),
    ("number", "Number Slider"),
    ("num", "Number Slider"),
    ("panel", "Panel"),
    ("display", "Panel"),
    ("toggle", "Boolean Toggle"),
    ("bool", "Boolean Toggle"),
    ("boolean", "Boolean Toggle"),
    ("pt", "Construct Point"),
    ("point", "Construct Point"),
    ("xyz", "Construct Point"),
    ("xy", "XY Plane"),
    ("plane", "XY Plane"),
    ("cir", "Circle"),
    ("circle", "Circle"),
    ("ln", "Line"),
    ("line", "Line"),
    ("ext", "Extrude"),
    ("extrude", "Extrude"),
    ("translate", "Move"),
    ("series", "Series"),
    ("range", "Series"),
    ("unitz", "Unit Z"),
    ("zvector", "Unit Z"),
];

const PARAM_ALIASES: &[(&str, &str)] = &[
    ("r", "Radius"),
    ("rad", "Radius"),
    ("radius", "Radius"),
    ("pl", "Plane"),
    ("org", "Origin"),
    ("origin", "Origin"),
    ("res", "Result"),
    ("result", "Result"),
    ("out", "Result"),
    ("val", "Value"),
    ("value", "Value"),
    ("in", "Input"),
    ("input", "Input"),
    ("geo", "Geometry"),
    ("dir", "Direction"),
    ("cnt", "Count"),
];

static COMPONENT_ALIAS_TABLE: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(|| COMPONENT_ALIASES.iter().copied().collect());

static PARAM_ALIAS_TABLE: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(|| PARAM_ALIASES.iter().copied().collect());

/// Trim, lowercase, strip spaces and underscores.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A candidate name: the label matched against, and the canonical name the
/// match resolves to (nicknames resolve to the slot's or type's full name).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    label: String,
    canonical: String,
}

fn resolve_against(normalized: &str, candidates: &[Candidate]) -> Option<String> {
    if normalized.is_empty() {
        return None;
    }

    if let Some(exact) = candidates.iter().find(|c| normalize(&c.label) == normalized) {
        return Some(exact.canonical.clone());
    }

    let substrings = candidates
        .iter()
        .filter(|c| normalize(&c.label).contains(normalized))
        .collect::<Vec<_>>();
    if unique_canonicals(&substrings) == 1 {
        return Some(substrings[0].canonical.clone());
    }

    let prefixes = candidates
        .iter()
        .filter(|c| normalize(&c.label).starts_with(normalized))
        .collect::<Vec<_>>();
    if unique_canonicals(&prefixes) == 1 {
        return Some(prefixes[0].canonical.clone());
    }

    // Least-specific-name tie-break: favor canonical short names over
    // decorated variants.
    if unique_canonicals(&substrings) > 1 {
        if let Some(shortest) = substrings.iter().min_by_key(|c| c.label.len()) {
            return Some(shortest.canonical.clone());
        }
    }

    None
}

fn unique_canonicals(matches: &[&Candidate]) -> usize {
    let mut canonicals = matches.iter().map(|c| c.canonical.as_str()).collect::<Vec<_>>();
    canonicals.sort_unstable();
    canonicals.dedup();
    canonicals.len()
}

fn component_candidates() -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for component in catalog::all() {
        candidates.push(Candidate {
            label: component.name.clone(),
            canonical: component.name.clone(),
        });
        candidates.push(Candidate {
            label: component.nickname.clone(),
            canonical: component.name.clone(),
        });
    }
    candidates
}

fn slot_candidates(slots: &[SlotDescriptor]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for slot in slots {
        candidates.push(Candidate {
            label: slot.name.clone(),
            canonical: slot.name.clone(),
        });
        candidates.push(Candidate {
            label: slot.nickname.clone(),
            canonical: slot.name.clone(),
        });
    }
    candidates
}

/// Resolve a user-supplied component-type name against the catalog.
pub fn resolve_component_type(input: &str) -> String {
    let normalized = normalize(input);
    if let Some(canonical) = COMPONENT_ALIAS_TABLE.get(normalized.as_str()) {
        return (*canonical).to_owned();
    }
    resolve_against(&normalized, &component_candidates())
        .unwrap_or_else(|| input.trim().to_owned())
}

/// Resolve a user-supplied slot name against a node's declared slots.
///
/// The alias table applies to the *naming* step only; the candidate ladder
/// then runs against the node's actual slot names and nicknames. Used by
/// naming surfaces (assertions) that accept conventional shorthand.
pub fn resolve_slot_name(input: &str, slots: &[SlotDescriptor]) -> String {
    let normalized = normalize(input);
    let effective = match PARAM_ALIAS_TABLE.get(normalized.as_str()) {
        Some(canonical) => (*canonical).to_owned(),
        None => input.trim().to_owned(),
    };
    resolve_against(&normalize(&effective), &slot_candidates(slots)).unwrap_or(effective)
}

/// Resolve a slot *selection* against a node's live slots: ladder only, no
/// alias pre-map. An alias would rewrite the input towards a slot the node
/// may not even declare, hiding a live slot the ladder would have matched.
pub fn select_slot_name(input: &str, slots: &[SlotDescriptor]) -> String {
    resolve_against(&normalize(input), &slot_candidates(slots))
        .unwrap_or_else(|| input.trim().to_owned())
}

/// Fuzzy score for ranking search results; not part of the resolution ladder.
pub fn search_score(query: &str, target: &str) -> f64 {
    let normalized_query = normalize(query);
    let normalized_target = normalize(target);
    let mut score = rapidfuzz::fuzz::ratio(normalized_query.chars(), normalized_target.chars());
    if !normalized_query.is_empty() && normalized_target.contains(&normalized_query) {
        score += 25.0;
    }
    score
}
