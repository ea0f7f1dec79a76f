// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Data-family compatibility matrix.
//!
//! Allow-list plus deny-overrides; deny wins over the permissive `Generic`
//! rule, and unlisted pairs are incompatible.

use crate::model::DataFamily;

/// Whether a source slot of `source` family may feed a target slot of
/// `target` family.
pub fn compatible(source: DataFamily, target: DataFamily) -> bool {
    use DataFamily::*;

    if denied(source, target) {
        return false;
    }

    if source == Generic || target == Generic {
        return true;
    }

    matches!(
        (source, target),
        (Number, Number)
            | (Text, Text)
            | (Boolean, Boolean)
            | (Point, Point)
            | (Point, Vector)
            | (Vector, Point)
            | (Vector, Vector)
            | (Plane, Plane)
            | (Curve, Curve)
            | (Curve, Geometry)
            | (Geometry, Geometry)
    )
}

/// Explicit negative overrides: a scalar numeric source never feeds a
/// geometric container slot, whatever the allow-list would say.
fn denied(source: DataFamily, target: DataFamily) -> bool {
    use DataFamily::*;

    matches!((source, target), (Number, Point | Vector | Plane | Curve | Geometry))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::compatible;
    use crate::model::DataFamily::*;

    #[rstest]
    #[case(Number, Number)]
    #[case(Point, Vector)]
    #[case(Vector, Point)]
    #[case(Curve, Geometry)]
    #[case(Geometry, Geometry)]
    #[case(Number, Generic)]
    #[case(Generic, Geometry)]
    #[case(Curve, Generic)]
    fn accepted_pairs(#[case] source: crate::model::DataFamily, #[case] target: crate::model::DataFamily) {
        assert!(compatible(source, target), "{source} -> {target}");
    }

    #[rstest]
    #[case(Number, Geometry)]
    #[case(Number, Curve)]
    #[case(Number, Plane)]
    #[case(Number, Point)]
    #[case(Number, Vector)]
    #[case(Geometry, Curve)]
    #[case(Text, Number)]
    #[case(Plane, Point)]
    fn rejected_pairs(#[case] source: crate::model::DataFamily, #[case] target: crate::model::DataFamily) {
        assert!(!compatible(source, target), "{source} -> {target}");
    }
}
