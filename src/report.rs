//! Text and JSON presentation of a measurement set.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::guide::GuideFit;
use crate::measurements::MeasurementSet;
use crate::types::Frame;

/// Ordered label -> formatted value record, e.g. `"Height": "172 cm (estimated)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    entries: Vec<(&'static str, String)>,
}

impl MeasurementRecord {
    pub fn from_set(set: &MeasurementSet) -> Self {
        let entries = set.iter().map(|(m, v)| (m.label(), v.to_string())).collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export the record as pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

impl Serialize for MeasurementRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

pub fn format_human_readable(frame: &Frame, set: &MeasurementSet, fit: Option<GuideFit>) -> String {
    let mut s = String::new();

    let _ = writeln!(s, "Frame: {}x{}", frame.width(), frame.height());
    if let Some(fit) = fit {
        let verdict = if fit.fits() { "inside guide" } else { "outside guide" };
        let _ = writeln!(
            s,
            "Pose: {}/{} key landmarks {}",
            fit.inside, fit.checked, verdict
        );
    }

    s.push_str("\nMeasurements:\n");
    let width = set.iter().map(|(m, _)| m.label().len()).max().unwrap_or(0);
    for (m, v) in set.iter() {
        let _ = writeln!(s, "  {:<width$}  {}", m.label(), v, width = width);
    }

    let fallbacks = set.fallback_count();
    if fallbacks > 0 {
        let _ = writeln!(
            s,
            "\n{} of {} values estimated from image proportions.",
            fallbacks,
            set.len()
        );
    }

    s
}
