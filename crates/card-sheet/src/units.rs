//! Length units
//!
//! Everything downstream of the layout planner works in PDF points. Config
//! values may be given in millimeters; `Measurement` keeps the unit attached
//! until the value is converted.

use crate::constants::{MM_PER_INCH, POINTS_PER_INCH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// Unit a `Measurement` is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    Mm,
    Pt,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Pt => "pt",
        }
    }
}

/// A length tagged with its unit.
///
/// Derived equality compares value *and* unit, so `25.4mm != 72pt`. Use
/// [`Measurement::approx_eq`] to compare physical lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub const fn mm(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Mm,
        }
    }

    pub const fn pt(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Pt,
        }
    }

    /// Length in points
    pub fn to_pt(self) -> f64 {
        match self.unit {
            Unit::Mm => mm_to_pt(self.value),
            Unit::Pt => self.value,
        }
    }

    /// Length in millimeters
    pub fn to_mm(self) -> f64 {
        match self.unit {
            Unit::Mm => self.value,
            Unit::Pt => pt_to_mm(self.value),
        }
    }

    /// Compare two lengths after converting both to points
    pub fn approx_eq(self, other: Measurement, tolerance_pt: f64) -> bool {
        (self.to_pt() - other.to_pt()).abs() <= tolerance_pt
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_is_72_points() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversions_share_one_factor() {
        assert!((mm_to_pt(1.0) - crate::constants::POINTS_PER_MM).abs() < 1e-12);
        assert!((pt_to_mm(crate::constants::POINTS_PER_MM) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pt_to_mm_inverts_mm_to_pt() {
        for mm in [0.0, 1.0, 5.0, 85.0, 210.0, 297.0] {
            assert!((pt_to_mm(mm_to_pt(mm)) - mm).abs() < 1e-9);
        }
    }

    #[test]
    fn test_measurement_units_are_not_mixed() {
        let inch_mm = Measurement::mm(25.4);
        let inch_pt = Measurement::pt(72.0);

        assert_ne!(inch_mm, inch_pt);
        assert!(inch_mm.approx_eq(inch_pt, 1e-9));
        assert!((inch_pt.to_mm() - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(Measurement::mm(85.0).to_string(), "85mm");
        assert_eq!(Measurement::pt(9.5).to_string(), "9.5pt");
    }
}
