use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Selects which schema/model pair governs a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Pickup,
    Delivery,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "pickup" => Some(Mode::Pickup),
            "delivery" => Some(Mode::Delivery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pickup => "pickup",
            Mode::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged feature value. Request JSON is kept loosely typed on ingest:
/// numbers stay numeric, strings stay text until shaping, nulls are missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    pub fn from_json(value: &Value) -> Cell {
        match value {
            Value::Null => Cell::Missing,
            Value::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Attempt numeric coercion: text that parses as a float becomes a
    /// number; anything else is kept as-is. Never fails.
    pub fn coerced(self) -> Cell {
        match self {
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => Cell::Number(n),
                Err(_) => Cell::Text(s),
            },
            other => other,
        }
    }

    /// Force a text representation, used for categorical columns.
    /// A missing value stays missing rather than becoming the text "nan".
    pub fn as_text(self) -> Cell {
        match self {
            Cell::Number(n) => Cell::Text(n.to_string()),
            other => other,
        }
    }
}

/// Body of a successful `POST /predict` response.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub mode: Mode,
    pub eta_normalized: f64,
    pub eta_minutes: f64,
    pub processing_time_sec: f64,
}
