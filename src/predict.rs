//! Prediction orchestration: normalizer → shaper → scoring function →
//! output denormalization, selected by mode.

use anyhow::Result;

use crate::config::Settings;
use crate::model::{Scorer, TorchScorer};
use crate::payload::{self, FeaturePayload};
use crate::scaling::{EtaScalingTable, ScalingTable};
use crate::schema;
use crate::types::{Cell, Mode};

#[derive(Debug)]
pub struct Prediction {
    pub eta_minutes: f64,
    pub eta_normalized: f64,
}

/// Read-only prediction state: the two scaling tables, the ETA output
/// bounds, and the two loaded scoring functions. Built once at startup and
/// shared behind an `Arc`.
pub struct Predictor {
    pickup_scaling: ScalingTable,
    delivery_scaling: ScalingTable,
    eta_scaling: EtaScalingTable,
    pickup_scorer: Box<dyn Scorer>,
    delivery_scorer: Box<dyn Scorer>,
}

impl Predictor {
    pub fn new(
        pickup_scaling: ScalingTable,
        delivery_scaling: ScalingTable,
        eta_scaling: EtaScalingTable,
        pickup_scorer: Box<dyn Scorer>,
        delivery_scorer: Box<dyn Scorer>,
    ) -> Self {
        Self {
            pickup_scaling,
            delivery_scaling,
            eta_scaling,
            pickup_scorer,
            delivery_scorer,
        }
    }

    /// Load all artifacts named in `settings`: three scaling-parameter files
    /// and the two TorchScript models with their meta sidecars.
    pub fn load(settings: &Settings) -> Result<Self> {
        let pickup_scaling = ScalingTable::load(&settings.pickup_scaling_path)?;
        let delivery_scaling = ScalingTable::load(&settings.delivery_scaling_path)?;
        let eta_scaling = EtaScalingTable::load(&settings.eta_scaling_path)?;

        let pickup_scorer = TorchScorer::load(
            &settings.pickup_model_path,
            &settings.pickup_meta_path,
            schema::expected_columns(Mode::Pickup),
        )?;
        let delivery_scorer = TorchScorer::load(
            &settings.delivery_model_path,
            &settings.delivery_meta_path,
            schema::expected_columns(Mode::Delivery),
        )?;
        tracing::info!("models loaded (pickup & delivery)");

        Ok(Self::new(
            pickup_scaling,
            delivery_scaling,
            eta_scaling,
            Box::new(pickup_scorer),
            Box::new(delivery_scorer),
        ))
    }

    fn scaling(&self, mode: Mode) -> &ScalingTable {
        match mode {
            Mode::Pickup => &self.pickup_scaling,
            Mode::Delivery => &self.delivery_scaling,
        }
    }

    fn scorer(&self, mode: Mode) -> &dyn Scorer {
        match mode {
            Mode::Pickup => self.pickup_scorer.as_ref(),
            Mode::Delivery => self.delivery_scorer.as_ref(),
        }
    }

    /// Normalize numeric features in place, shape the row, score it, and
    /// scale the model's output back to minutes. Text entries bypass
    /// normalization entirely; any failure propagates unchanged.
    pub fn predict(&self, mut features: FeaturePayload, mode: Mode) -> Result<Prediction> {
        let table = self.scaling(mode);
        for (column, cell) in features.iter_mut() {
            if let Cell::Number(v) = cell {
                *cell = Cell::Number(table.normalize(column, *v));
            }
        }

        let row = payload::shape(&features, mode);
        let eta_normalized = self.scorer(mode).score(&row)?;
        let eta_minutes = self.eta_scaling.denormalize(mode, eta_normalized);

        Ok(Prediction { eta_minutes, eta_normalized })
    }
}
