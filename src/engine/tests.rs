// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

use super::{
    clear_document, connect, create_node, remove_node, validate_connection, ConnectionSpec,
    EngineError, SlotRef,
};
use crate::doc::{GraphDocument, InMemoryDocument};
use crate::model::{DataFamily, NodeId};

fn doc() -> InMemoryDocument {
    InMemoryDocument::new("engine tests")
}

fn spec(source: NodeId, target: NodeId) -> ConnectionSpec {
    ConnectionSpec {
        source,
        target,
        source_slot: None,
        target_slot: None,
    }
}

#[test]
fn create_node_resolves_aliases() {
    let mut doc = doc();
    let (id, resolved) = create_node(&mut doc, "add", 10.0, 20.0).expect("create");
    assert_eq!(resolved, "Addition");
    let info = doc.node_info(id).expect("info");
    assert_eq!(info.type_name, "Addition");
    assert_eq!((info.x, info.y), (10.0, 20.0));
}

#[test]
fn create_node_rejects_unknown_types() {
    let mut doc = doc();
    let err = create_node(&mut doc, "frobnicator", 0.0, 0.0).unwrap_err();
    assert_eq!(err, EngineError::UnknownNodeType("frobnicator".to_owned()));
    assert!(doc.node_ids().is_empty());
}

#[test]
fn connect_defaults_to_the_single_output_slot() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (add, _) = create_node(&mut doc, "Addition", 100.0, 0.0).expect("addition");

    let resolved = connect(&mut doc, &spec(slider, add)).expect("connect");
    assert_eq!(resolved.source_slot, "Value");
    assert_eq!(resolved.target_slot, "A");
}

#[test]
fn auto_routing_fills_lettered_slots_in_order() {
    let mut doc = doc();
    let (add, _) = create_node(&mut doc, "Addition", 0.0, 0.0).expect("addition");
    let sliders = (0..4)
        .map(|i| {
            create_node(&mut doc, "Number Slider", 0.0, f64::from(i) * 30.0)
                .expect("slider")
                .0
        })
        .collect::<Vec<_>>();

    let mut letters = Vec::new();
    for slider in &sliders {
        letters.push(connect(&mut doc, &spec(*slider, add)).expect("connect").target_slot);
    }
    assert_eq!(letters, ["A", "B", "C", "D"]);

    let (extra, _) = create_node(&mut doc, "Number Slider", 0.0, 200.0).expect("slider");
    let err = connect(&mut doc, &spec(extra, add)).unwrap_err();
    assert_eq!(err, EngineError::NoAvailableSlot { node: add });
}

#[test]
fn explicit_target_slot_uses_replace_semantics() {
    let mut doc = doc();
    let (first, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (second, _) = create_node(&mut doc, "Number Slider", 0.0, 30.0).expect("slider");
    let (add, _) = create_node(&mut doc, "Addition", 100.0, 0.0).expect("addition");

    let mut wired = spec(first, add);
    wired.target_slot = Some(SlotRef::Name("A".to_owned()));
    connect(&mut doc, &wired).expect("first connect");

    let mut rewired = spec(second, add);
    rewired.target_slot = Some(SlotRef::Name("A".to_owned()));
    connect(&mut doc, &rewired).expect("second connect");

    let sources = doc.slot_sources(add, "A").expect("slot");
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].node_id, second);
}

#[test]
fn unspecified_target_on_plain_node_picks_the_first_input() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (sub, _) = create_node(&mut doc, "Subtraction", 100.0, 0.0).expect("subtraction");

    let resolved = connect(&mut doc, &spec(slider, sub)).expect("connect");
    assert_eq!(resolved.target_slot, "A");
}

#[test]
fn multi_output_source_without_a_slot_is_ambiguous() {
    let mut doc = doc();
    let (mover, _) = create_node(&mut doc, "Move", 0.0, 0.0).expect("move");
    let (extrude, _) = create_node(&mut doc, "Extrude", 100.0, 0.0).expect("extrude");

    let mut attempt = spec(mover, extrude);
    attempt.target_slot = Some(SlotRef::Name("Base".to_owned()));
    let err = connect(&mut doc, &attempt).unwrap_err();
    assert_eq!(err, EngineError::AmbiguousSource { node: mover, outputs: 2 });
}

#[test]
fn slot_index_references_bypass_name_resolution() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (circle, _) = create_node(&mut doc, "Circle", 100.0, 0.0).expect("circle");

    let mut by_index = spec(slider, circle);
    by_index.target_slot = Some(SlotRef::Index(1));
    let resolved = connect(&mut doc, &by_index).expect("connect");
    assert_eq!(resolved.target_slot, "Radius");

    let mut out_of_range = spec(slider, circle);
    out_of_range.target_slot = Some(SlotRef::Index(5));
    let err = connect(&mut doc, &out_of_range).unwrap_err();
    assert_eq!(
        err,
        EngineError::SlotNotFound {
            node: circle,
            slot: "index 5".to_owned(),
        }
    );
}

#[test]
fn slot_names_resolve_through_aliases_and_nicknames() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (circle, _) = create_node(&mut doc, "Circle", 100.0, 0.0).expect("circle");

    let mut aliased = spec(slider, circle);
    aliased.target_slot = Some(SlotRef::Name("r".to_owned()));
    let resolved = connect(&mut doc, &aliased).expect("connect");
    assert_eq!(resolved.target_slot, "Radius");
}

#[test]
fn slot_selection_prefers_live_slots_over_naming_shorthand() {
    let mut doc = doc();
    let (point, _) = create_node(&mut doc, "Construct Point", 0.0, 0.0).expect("point");
    let (plane, _) = create_node(&mut doc, "XY Plane", 100.0, 0.0).expect("plane");

    // "in" is conventional shorthand for "Input", which XY Plane does not
    // declare; the live "Origin" slot matches by substring and wins.
    let mut attempt = spec(point, plane);
    attempt.target_slot = Some(SlotRef::Name("in".to_owned()));
    let resolved = connect(&mut doc, &attempt).expect("connect");
    assert_eq!(resolved.target_slot, "Origin");
}

#[test]
fn number_source_never_feeds_a_geometry_slot() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (extrude, _) = create_node(&mut doc, "Extrude", 100.0, 0.0).expect("extrude");

    let mut attempt = spec(slider, extrude);
    attempt.target_slot = Some(SlotRef::Name("Base".to_owned()));
    let err = connect(&mut doc, &attempt).unwrap_err();
    assert_eq!(
        err,
        EngineError::IncompatibleTypes {
            source: DataFamily::Number,
            target: DataFamily::Geometry,
        }
    );
}

#[test]
fn number_source_feeds_a_generic_panel_input() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (panel, _) = create_node(&mut doc, "Panel", 100.0, 0.0).expect("panel");

    let resolved = connect(&mut doc, &spec(slider, panel)).expect("connect");
    assert_eq!(resolved.target_slot, "Input");
    assert_eq!(resolved.target_family, DataFamily::Generic);
}

#[test]
fn validate_never_mutates_the_document() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let (add, _) = create_node(&mut doc, "Addition", 100.0, 0.0).expect("addition");

    let resolved = validate_connection(&doc, &spec(slider, add)).expect("validate");
    assert_eq!(resolved.target_slot, "A");
    assert_eq!(doc.slot_sources(add, "A").expect("slot"), Vec::new());
}

#[test]
fn connect_reports_missing_nodes() {
    let mut doc = doc();
    let (slider, _) = create_node(&mut doc, "Number Slider", 0.0, 0.0).expect("slider");
    let ghost = NodeId::random();

    let err = connect(&mut doc, &spec(slider, ghost)).unwrap_err();
    assert_eq!(err, EngineError::NodeNotFound(ghost));

    let err = connect(&mut doc, &spec(ghost, slider)).unwrap_err();
    assert_eq!(err, EngineError::NodeNotFound(ghost));
}

#[test]
fn clear_spares_persistent_infrastructure() {
    let mut doc = doc();
    let (keep, _) = create_node(&mut doc, "Panel", 0.0, 0.0).expect("panel");
    create_node(&mut doc, "Number Slider", 0.0, 30.0).expect("slider");
    create_node(&mut doc, "Addition", 100.0, 0.0).expect("addition");
    doc.set_persistent(keep, true);

    assert_eq!(clear_document(&mut doc), 2);
    assert_eq!(doc.node_ids(), vec![keep]);
}

#[test]
fn remove_refuses_persistent_nodes() {
    let mut doc = doc();
    let (keep, _) = create_node(&mut doc, "Panel", 0.0, 0.0).expect("panel");
    doc.set_persistent(keep, true);

    let err = remove_node(&mut doc, keep).unwrap_err();
    assert_eq!(err, EngineError::PersistentNode(keep));
    assert_eq!(doc.node_ids(), vec![keep]);
}
