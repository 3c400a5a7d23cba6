use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::Path};
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::payload::ShapedRow;
use crate::types::Cell;

/// The opaque scoring boundary: one fixed-schema row in, one scalar out.
///
/// Production uses [`TorchScorer`]; tests inject stand-ins at this seam.
pub trait Scorer: Send + Sync {
    fn score(&self, row: &ShapedRow) -> Result<f64>;
}

#[derive(Deserialize)]
struct MetaJson {
    feat_list: Vec<String>,
    /// Training-time level ordering per categorical column. A text value
    /// encodes as its index in the list; unseen values encode as -1.
    categorical_levels: HashMap<String, Vec<String>>,
}

/// TorchScript export of the trained regressor, plus the sidecar meta.json
/// describing how its numeric input vector is laid out.
pub struct TorchScorer {
    model: CModule,
    device: Device,
    meta: MetaJson,
}

impl TorchScorer {
    pub fn load(model_path: &str, meta_path: &str, expected_columns: &[&str]) -> Result<Self> {
        let device = Device::Cpu;

        let meta_txt = fs::read_to_string(Path::new(meta_path))
            .with_context(|| format!("failed to read meta at {meta_path}"))?;
        let meta: MetaJson = serde_json::from_str(&meta_txt)
            .with_context(|| format!("failed to parse {meta_path}"))?;

        if meta.feat_list.iter().map(String::as_str).ne(expected_columns.iter().copied()) {
            tracing::warn!(
                "meta feat_list at {} does not match the expected column order; using the fixed schema",
                meta_path
            );
        }

        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {model_path}"))?;

        // Probe with a dummy forward — the output must be a single scalar.
        let dummy = Tensor::zeros([1, expected_columns.len() as i64], (Kind::Float, device));
        let t = model.forward_ts(&[dummy])?;
        let sz = t.size();
        if sz.iter().product::<i64>() != 1 {
            bail!("unexpected model output size: {:?}", sz);
        }

        Ok(Self { model, device, meta })
    }

    fn encode(&self, column: &str, cell: &Cell) -> f32 {
        if let Some(levels) = self.meta.categorical_levels.get(column) {
            return match cell {
                Cell::Text(s) => levels
                    .iter()
                    .position(|l| l == s)
                    .map(|i| i as f32)
                    .unwrap_or(-1.0),
                Cell::Number(n) => {
                    let s = n.to_string();
                    levels
                        .iter()
                        .position(|l| *l == s)
                        .map(|i| i as f32)
                        .unwrap_or(-1.0)
                }
                Cell::Missing => f32::NAN,
            };
        }
        match cell {
            Cell::Number(n) => *n as f32,
            Cell::Text(s) => s.trim().parse::<f32>().unwrap_or(f32::NAN),
            Cell::Missing => f32::NAN,
        }
    }
}

impl Scorer for TorchScorer {
    fn score(&self, row: &ShapedRow) -> Result<f64> {
        let x: Vec<f32> = row
            .columns
            .iter()
            .zip(&row.cells)
            .map(|(col, cell)| self.encode(col, cell))
            .collect();

        let input = Tensor::from_slice(&x)
            .reshape([1, x.len() as i64])
            .to_device(self.device);

        let out = self.model.forward_ts(&[input])?;
        let sz = out.size();
        if sz.iter().product::<i64>() != 1 {
            bail!("unexpected model output size: {:?}", sz);
        }

        Ok(out.reshape([-1]).double_value(&[0]))
    }
}
