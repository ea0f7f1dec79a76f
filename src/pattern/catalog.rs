// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Built-in pattern templates. Static catalog data, loaded once, read-only
//! at runtime.

use once_cell::sync::Lazy;

use crate::model::ObservableValue;

use super::{PatternTemplate, TemplateEdge, TemplateNode};

fn node(template_id: &str, type_name: &str, x: f64, y: f64) -> TemplateNode {
    TemplateNode {
        template_id: template_id.to_owned(),
        type_name: type_name.to_owned(),
        x,
        y,
        value: None,
    }
}

fn node_with_value(
    template_id: &str,
    type_name: &str,
    x: f64,
    y: f64,
    value: ObservableValue,
) -> TemplateNode {
    TemplateNode {
        value: Some(value),
        ..node(template_id, type_name, x, y)
    }
}

fn edge(source: &str, source_slot: &str, target: &str, target_slot: &str) -> TemplateEdge {
    TemplateEdge {
        source: source.to_owned(),
        source_slot: source_slot.to_owned(),
        target: target.to_owned(),
        target_slot: target_slot.to_owned(),
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_owned()).collect()
}

pub(super) static TEMPLATES: Lazy<Vec<PatternTemplate>> = Lazy::new(|| {
    vec![
        PatternTemplate {
            name: "addition".to_owned(),
            description: "Two sliders feeding an addition, result shown in a panel".to_owned(),
            keywords: keywords(&["add", "addition", "sum", "plus", "numbers", "arithmetic"]),
            nodes: vec![
                node_with_value("a", "Number Slider", 0.0, 0.0, ObservableValue::Number(1.0)),
                node_with_value("b", "Number Slider", 0.0, 60.0, ObservableValue::Number(2.0)),
                node("sum", "Addition", 200.0, 30.0),
                node("out", "Panel", 400.0, 30.0),
            ],
            edges: vec![
                edge("a", "Value", "sum", "A"),
                edge("b", "Value", "sum", "B"),
                edge("sum", "Result", "out", "Input"),
            ],
        },
        PatternTemplate {
            name: "multiplication".to_owned(),
            description: "Two sliders feeding a multiplication, result shown in a panel"
                .to_owned(),
            keywords: keywords(&["multiply", "multiplication", "product", "times", "scale"]),
            nodes: vec![
                node_with_value("a", "Number Slider", 0.0, 0.0, ObservableValue::Number(2.0)),
                node_with_value("b", "Number Slider", 0.0, 60.0, ObservableValue::Number(3.0)),
                node("product", "Multiplication", 200.0, 30.0),
                node("out", "Panel", 400.0, 30.0),
            ],
            edges: vec![
                edge("a", "Value", "product", "A"),
                edge("b", "Value", "product", "B"),
                edge("product", "Result", "out", "Input"),
            ],
        },
        PatternTemplate {
            name: "circle".to_owned(),
            description: "A circle on the XY plane with a slider-driven radius".to_owned(),
            keywords: keywords(&["circle", "radius", "round", "ring", "curve"]),
            nodes: vec![
                node_with_value("radius", "Number Slider", 0.0, 0.0, ObservableValue::Number(5.0)),
                node("plane", "XY Plane", 0.0, 80.0),
                node("circle", "Circle", 220.0, 40.0),
            ],
            edges: vec![
                edge("plane", "Plane", "circle", "Plane"),
                edge("radius", "Value", "circle", "Radius"),
            ],
        },
        PatternTemplate {
            name: "point".to_owned(),
            description: "A point constructed from three coordinate sliders".to_owned(),
            keywords: keywords(&["point", "coordinates", "xyz", "position", "construct"]),
            nodes: vec![
                node_with_value("x", "Number Slider", 0.0, 0.0, ObservableValue::Number(0.0)),
                node_with_value("y", "Number Slider", 0.0, 60.0, ObservableValue::Number(0.0)),
                node_with_value("z", "Number Slider", 0.0, 120.0, ObservableValue::Number(0.0)),
                node("point", "Construct Point", 220.0, 60.0),
            ],
            edges: vec![
                edge("x", "Value", "point", "X coordinate"),
                edge("y", "Value", "point", "Y coordinate"),
                edge("z", "Value", "point", "Z coordinate"),
            ],
        },
        PatternTemplate {
            name: "extrusion".to_owned(),
            description: "A circle extruded along the Z axis into a cylinder".to_owned(),
            keywords: keywords(&["extrude", "extrusion", "cylinder", "solid", "height"]),
            nodes: vec![
                node_with_value("radius", "Number Slider", 0.0, 0.0, ObservableValue::Number(5.0)),
                node("plane", "XY Plane", 0.0, 80.0),
                node("circle", "Circle", 220.0, 40.0),
                node("axis", "Unit Z", 220.0, 140.0),
                node("extrude", "Extrude", 440.0, 80.0),
            ],
            edges: vec![
                edge("plane", "Plane", "circle", "Plane"),
                edge("radius", "Value", "circle", "Radius"),
                edge("circle", "Circle", "extrude", "Base"),
                edge("axis", "Unit vector", "extrude", "Direction"),
            ],
        },
        PatternTemplate {
            name: "value display".to_owned(),
            description: "A slider wired straight into a panel".to_owned(),
            keywords: keywords(&["display", "show", "panel", "value", "slider", "watch"]),
            nodes: vec![
                node_with_value("value", "Number Slider", 0.0, 0.0, ObservableValue::Number(0.5)),
                node("out", "Panel", 220.0, 0.0),
            ],
            edges: vec![edge("value", "Value", "out", "Input")],
        },
    ]
});
