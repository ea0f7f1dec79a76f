// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Static component-type catalog.
//!
//! The catalog is immutable configuration data built once at startup. The
//! commutative-aggregation capability is a flag on the descriptor, so new
//! aggregation types are added by registration here, never by name matching.

use once_cell::sync::Lazy;

use super::slot::{DataFamily, Multiplicity, ObservableValue, SlotDescriptor};

/// What observable value, if any, a component type carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservableKind {
    None,
    Number { default: f64 },
    Text,
    Boolean { default: bool },
}

impl ObservableKind {
    pub fn default_value(&self) -> Option<ObservableValue> {
        match self {
            Self::None => None,
            Self::Number { default } => Some(ObservableValue::Number(*default)),
            Self::Text => Some(ObservableValue::Text(String::new())),
            Self::Boolean { default } => Some(ObservableValue::Boolean(*default)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentType {
    pub name: String,
    pub nickname: String,
    pub category: String,
    pub inputs: Vec<SlotDescriptor>,
    pub outputs: Vec<SlotDescriptor>,
    /// Commutative aggregation: the inputs are a fixed ordered set of
    /// interchangeable lettered slots and the engine may auto-route to the
    /// first free one.
    pub aggregation: bool,
    pub observable: ObservableKind,
}

impl ComponentType {
    fn new(name: &str, nickname: &str, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            nickname: nickname.to_owned(),
            category: category.to_owned(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            aggregation: false,
            observable: ObservableKind::None,
        }
    }

    fn input(mut self, slot: SlotDescriptor) -> Self {
        self.inputs.push(slot);
        self
    }

    fn output(mut self, slot: SlotDescriptor) -> Self {
        self.outputs.push(slot);
        self
    }

    fn aggregation(mut self) -> Self {
        self.aggregation = true;
        self
    }

    fn observable(mut self, kind: ObservableKind) -> Self {
        self.observable = kind;
        self
    }
}

fn slot(name: &str, nickname: &str, family: DataFamily) -> SlotDescriptor {
    SlotDescriptor::new(name, nickname, family)
}

fn lettered_number_inputs() -> [SlotDescriptor; 4] {
    [
        slot("A", "A", DataFamily::Number),
        slot("B", "B", DataFamily::Number),
        slot("C", "C", DataFamily::Number).optional(),
        slot("D", "D", DataFamily::Number).optional(),
    ]
}

static CATALOG: Lazy<Vec<ComponentType>> = Lazy::new(|| {
    let [a1, b1, c1, d1] = lettered_number_inputs();
    let [a2, b2, c2, d2] = lettered_number_inputs();

    vec![
        ComponentType::new("Number Slider", "Slider", "Params")
            .output(slot("Value", "N", DataFamily::Number))
            .observable(ObservableKind::Number { default: 0.5 }),
        ComponentType::new("Panel", "Pan", "Params")
            .input(
                slot("Input", "In", DataFamily::Generic)
                    .with_multiplicity(Multiplicity::Tree)
                    .optional(),
            )
            .observable(ObservableKind::Text),
        ComponentType::new("Boolean Toggle", "Toggle", "Params")
            .output(slot("Value", "B", DataFamily::Boolean))
            .observable(ObservableKind::Boolean { default: false }),
        ComponentType::new("Addition", "Add", "Maths")
            .input(a1)
            .input(b1)
            .input(c1)
            .input(d1)
            .output(slot("Result", "R", DataFamily::Number))
            .aggregation(),
        ComponentType::new("Multiplication", "Mul", "Maths")
            .input(a2)
            .input(b2)
            .input(c2)
            .input(d2)
            .output(slot("Result", "R", DataFamily::Number))
            .aggregation(),
        ComponentType::new("Subtraction", "Sub", "Maths")
            .input(slot("A", "A", DataFamily::Number))
            .input(slot("B", "B", DataFamily::Number))
            .output(slot("Result", "R", DataFamily::Number)),
        ComponentType::new("Division", "Div", "Maths")
            .input(slot("A", "A", DataFamily::Number))
            .input(slot("B", "B", DataFamily::Number))
            .output(slot("Result", "R", DataFamily::Number)),
        ComponentType::new("Series", "Ser", "Sets")
            .input(slot("Start", "S", DataFamily::Number).optional())
            .input(slot("Step", "N", DataFamily::Number).optional())
            .input(slot("Count", "C", DataFamily::Number).optional())
            .output(slot("Series", "S", DataFamily::Number).with_multiplicity(Multiplicity::List)),
        ComponentType::new("Construct Point", "Pt", "Vector")
            .input(slot("X coordinate", "X", DataFamily::Number).optional())
            .input(slot("Y coordinate", "Y", DataFamily::Number).optional())
            .input(slot("Z coordinate", "Z", DataFamily::Number).optional())
            .output(slot("Point", "Pt", DataFamily::Point)),
        ComponentType::new("Unit Z", "Z", "Vector")
            .input(slot("Factor", "F", DataFamily::Number).optional())
            .output(slot("Unit vector", "V", DataFamily::Vector)),
        ComponentType::new("XY Plane", "XY", "Vector")
            .input(slot("Origin", "O", DataFamily::Point).optional())
            .output(slot("Plane", "P", DataFamily::Plane)),
        ComponentType::new("Circle", "Cir", "Curve")
            .input(slot("Plane", "P", DataFamily::Plane).optional())
            .input(slot("Radius", "R", DataFamily::Number))
            .output(slot("Circle", "C", DataFamily::Curve)),
        ComponentType::new("Line", "Ln", "Curve")
            .input(slot("Start Point", "A", DataFamily::Point))
            .input(slot("End Point", "B", DataFamily::Point))
            .output(slot("Line", "L", DataFamily::Curve)),
        ComponentType::new("Move", "Move", "Transform")
            .input(slot("Geometry", "G", DataFamily::Geometry))
            .input(slot("Motion", "T", DataFamily::Vector).optional())
            .output(slot("Geometry", "G", DataFamily::Geometry))
            .output(slot("Transform", "X", DataFamily::Generic)),
        ComponentType::new("Extrude", "Extr", "Surface")
            .input(slot("Base", "B", DataFamily::Geometry))
            .input(slot("Direction", "D", DataFamily::Vector))
            .output(slot("Extrusion", "E", DataFamily::Geometry)),
    ]
});

pub fn all() -> &'static [ComponentType] {
    &CATALOG
}

/// Exact case-insensitive lookup by canonical name or nickname.
pub fn find(name: &str) -> Option<&'static ComponentType> {
    CATALOG.iter().find(|component| {
        component.name.eq_ignore_ascii_case(name) || component.nickname.eq_ignore_ascii_case(name)
    })
}
