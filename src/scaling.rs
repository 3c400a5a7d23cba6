//! Min-max scaling tables recorded at training time.
//!
//! Loaded once from JSON during startup and never mutated afterwards: the
//! feature tables map real-world values into the model's [0, 1] training
//! range, and the ETA table maps the model's normalized output back to
//! minutes.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::types::Mode;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Per-column min/max bounds for one mode's numeric features.
#[derive(Debug, Clone, Deserialize)]
pub struct ScalingTable(HashMap<String, Bounds>);

impl ScalingTable {
    pub fn new(bounds: HashMap<String, Bounds>) -> Self {
        Self(bounds)
    }

    pub fn load(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read scaling params at {path}"))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse scaling params at {path}"))
    }

    /// Map a real-world value onto the training-time [0, 1] range.
    ///
    /// Columns without recorded bounds (e.g. lat/lng) pass through unchanged,
    /// and a degenerate min == max range maps to 0 instead of dividing by
    /// zero. Live values outside the training bounds are not clamped.
    pub fn normalize(&self, column: &str, value: f64) -> f64 {
        match self.0.get(column) {
            None => value,
            Some(b) if b.max == b.min => 0.0,
            Some(b) => (value - b.min) / (b.max - b.min),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EtaBounds {
    pub eta_min: f64,
    pub eta_max: f64,
}

/// Output bounds per mode for denormalizing the model's prediction.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EtaScalingTable {
    pub pickup: EtaBounds,
    pub delivery: EtaBounds,
}

impl EtaScalingTable {
    pub fn load(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read ETA scaling params at {path}"))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse ETA scaling params at {path}"))
    }

    fn bounds(&self, mode: Mode) -> EtaBounds {
        match mode {
            Mode::Pickup => self.pickup,
            Mode::Delivery => self.delivery,
        }
    }

    /// Scale the model's normalized output back to real-world minutes.
    pub fn denormalize(&self, mode: Mode, eta_normalized: f64) -> f64 {
        let b = self.bounds(mode);
        eta_normalized * (b.eta_max - b.eta_min) + b.eta_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ScalingTable {
        let mut bounds = HashMap::new();
        bounds.insert("pickup_distance_km".to_string(), Bounds { min: 0.0, max: 10.0 });
        bounds.insert("accept_hour".to_string(), Bounds { min: 0.0, max: 23.0 });
        bounds.insert("aoi_type".to_string(), Bounds { min: 1.0, max: 1.0 });
        ScalingTable::new(bounds)
    }

    #[test]
    fn test_normalize_maps_bounds_to_unit_range() {
        let t = table();
        assert_eq!(t.normalize("pickup_distance_km", 0.0), 0.0);
        assert_eq!(t.normalize("pickup_distance_km", 10.0), 1.0);
        assert_eq!(t.normalize("accept_hour", 11.5), 0.5);
    }

    #[test]
    fn test_normalize_does_not_clamp() {
        let t = table();
        assert_eq!(t.normalize("pickup_distance_km", 20.0), 2.0);
        assert_eq!(t.normalize("pickup_distance_km", -5.0), -0.5);
    }

    #[test]
    fn test_degenerate_range_maps_to_zero() {
        let t = table();
        assert_eq!(t.normalize("aoi_type", 1.0), 0.0);
        assert_eq!(t.normalize("aoi_type", 42.0), 0.0);
    }

    #[test]
    fn test_unknown_column_passes_through() {
        let t = table();
        assert_eq!(t.normalize("lng", 106.55), 106.55);
        assert_eq!(t.normalize("lat", 29.56), 29.56);
    }

    #[test]
    fn test_denormalize() {
        let eta = EtaScalingTable {
            pickup: EtaBounds { eta_min: 5.0, eta_max: 120.0 },
            delivery: EtaBounds { eta_min: 10.0, eta_max: 240.0 },
        };
        assert_eq!(eta.denormalize(Mode::Pickup, 0.5), 62.5);
        assert_eq!(eta.denormalize(Mode::Delivery, 0.0), 10.0);
        assert_eq!(eta.denormalize(Mode::Delivery, 1.0), 240.0);
    }
}
