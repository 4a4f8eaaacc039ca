//! Measurement keys and result containers.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// The seven body measurements, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measurement {
    Height,
    ShoulderWidth,
    Chest,
    Waist,
    Hips,
    ArmLength,
    LegLength,
}

impl Measurement {
    pub const ALL: [Measurement; 7] = [
        Measurement::Height,
        Measurement::ShoulderWidth,
        Measurement::Chest,
        Measurement::Waist,
        Measurement::Hips,
        Measurement::ArmLength,
        Measurement::LegLength,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Measurement::Height => "Height",
            Measurement::ShoulderWidth => "Shoulder Width",
            Measurement::Chest => "Chest",
            Measurement::Waist => "Waist",
            Measurement::Hips => "Hips",
            Measurement::ArmLength => "Arm Length",
            Measurement::LegLength => "Leg Length",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A whole-centimeter value and whether it came from the image-proportion fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementValue {
    pub centimeters: f64,
    pub is_estimated_fallback: bool,
}

impl MeasurementValue {
    /// Measured from landmarks, rounded to the nearest centimeter.
    pub fn measured(raw_cm: f64) -> Self {
        Self {
            centimeters: round_half_up(raw_cm),
            is_estimated_fallback: false,
        }
    }

    /// Derived from frame proportions, rounded to the nearest centimeter.
    pub fn fallback(raw_cm: f64) -> Self {
        Self {
            centimeters: round_half_up(raw_cm),
            is_estimated_fallback: true,
        }
    }
}

impl std::fmt::Display for MeasurementValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} cm", self.centimeters)?;
        if self.is_estimated_fallback {
            f.write_str(" (estimated)")?;
        }
        Ok(())
    }
}

impl Serialize for MeasurementValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MeasurementValue", 2)?;
        s.serialize_field("centimeters", &self.centimeters)?;
        s.serialize_field("estimated", &self.is_estimated_fallback)?;
        s.end()
    }
}

/// Rounds halves toward positive infinity, so `22.5 -> 23` and `-2.5 -> -2`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// All seven measurements. Every key is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSet {
    values: [MeasurementValue; 7],
}

impl MeasurementSet {
    /// Build a set by evaluating `f` for every measurement key.
    pub fn from_fn(mut f: impl FnMut(Measurement) -> MeasurementValue) -> Self {
        Self {
            values: Measurement::ALL.map(&mut f),
        }
    }

    pub fn get(&self, measurement: Measurement) -> MeasurementValue {
        self.values[measurement.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, MeasurementValue)> + '_ {
        Measurement::ALL.into_iter().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of entries derived from the fallback heuristics.
    pub fn fallback_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| v.is_estimated_fallback)
            .count()
    }
}

impl std::ops::Index<Measurement> for MeasurementSet {
    type Output = MeasurementValue;

    fn index(&self, measurement: Measurement) -> &Self::Output {
        &self.values[measurement.index()]
    }
}

/// Serializes as a map keyed by display label, in display order.
impl Serialize for MeasurementSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (m, v) in self.iter() {
            map.serialize_entry(m.label(), &v)?;
        }
        map.end()
    }
}
