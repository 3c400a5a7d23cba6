//! Payload shaping: adapt a loosely structured feature mapping into the
//! fixed-order, fixed-schema row the scoring function expects.

use serde_json::Value;
use std::collections::HashMap;

use crate::schema;
use crate::types::{Cell, Mode};

pub type FeaturePayload = HashMap<String, Cell>;

/// Build the feature mapping from a request JSON object. Keys keep whatever
/// the client sent; the shaper decides which of them survive.
pub fn payload_from_json(object: &serde_json::Map<String, Value>) -> FeaturePayload {
    object
        .iter()
        .map(|(k, v)| (k.clone(), Cell::from_json(v)))
        .collect()
}

/// A model-ready row: exactly the mode's expected columns, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRow {
    pub columns: &'static [&'static str],
    pub cells: Vec<Cell>,
}

/// Shape a payload for the given mode.
///
/// Present values get a best-effort numeric coercion, categorical columns are
/// forced back to text regardless, absent expected columns are filled with a
/// missing marker, and anything outside the expected column list is dropped
/// silently. An empty payload yields an all-missing row.
pub fn shape(payload: &FeaturePayload, mode: Mode) -> ShapedRow {
    let columns = schema::expected_columns(mode);
    let cells = columns
        .iter()
        .map(|&col| {
            let cell = match payload.get(col) {
                None => Cell::Missing,
                Some(c) => c.clone().coerced(),
            };
            if schema::is_categorical(mode, col) {
                cell.as_text()
            } else {
                cell
            }
        })
        .collect();
    ShapedRow { columns, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_yields_all_missing_row() {
        let row = shape(&FeaturePayload::new(), Mode::Pickup);
        assert_eq!(row.columns, &schema::PICKUP_COLUMNS);
        assert_eq!(row.cells.len(), 15);
        assert!(row.cells.iter().all(|c| *c == Cell::Missing));
    }

    #[test]
    fn test_extra_columns_are_dropped() {
        let mut payload = FeaturePayload::new();
        payload.insert("city".into(), Cell::Text("Shanghai".into()));
        payload.insert("mode".into(), Cell::Text("pickup".into()));
        payload.insert("not_a_feature".into(), Cell::Number(99.0));

        let row = shape(&payload, Mode::Pickup);
        assert_eq!(row.columns.len(), 15);
        assert!(!row.columns.contains(&"not_a_feature"));
        assert!(!row.columns.contains(&"mode"));
    }

    #[test]
    fn test_numeric_text_is_coerced_except_categoricals() {
        let mut payload = FeaturePayload::new();
        payload.insert("accept_hour".into(), Cell::Text("10".into()));
        payload.insert("city".into(), Cell::Text("Chongqing".into()));
        payload.insert("aoi_type".into(), Cell::Number(1.0));
        payload.insert("day_type".into(), Cell::Number(0.0));

        let row = shape(&payload, Mode::Pickup);
        let get = |col: &str| {
            let i = row.columns.iter().position(|c| *c == col).unwrap();
            row.cells[i].clone()
        };

        assert_eq!(get("accept_hour"), Cell::Number(10.0));
        assert_eq!(get("city"), Cell::Text("Chongqing".into()));
        assert_eq!(get("aoi_type"), Cell::Number(1.0));
        // categorical override wins even for numeric input
        assert_eq!(get("day_type"), Cell::Text("0".into()));
    }

    #[test]
    fn test_unparseable_text_in_numeric_column_stays_text() {
        let mut payload = FeaturePayload::new();
        payload.insert("accept_hour".into(), Cell::Text("around ten".into()));

        let row = shape(&payload, Mode::Pickup);
        let i = row.columns.iter().position(|c| *c == "accept_hour").unwrap();
        assert_eq!(row.cells[i], Cell::Text("around ten".into()));
    }

    #[test]
    fn test_shaping_is_idempotent() {
        let mut payload = FeaturePayload::new();
        payload.insert("city".into(), Cell::Text("Yantai".into()));
        payload.insert("pickup_distance_km".into(), Cell::Text("2.3".into()));
        payload.insert("hour_bucket".into(), Cell::Text("Night".into()));

        let first = shape(&payload, Mode::Pickup);

        let roundtrip: FeaturePayload = first
            .columns
            .iter()
            .zip(&first.cells)
            .map(|(c, cell)| (c.to_string(), cell.clone()))
            .collect();
        let second = shape(&roundtrip, Mode::Pickup);

        assert_eq!(first, second);
    }

    #[test]
    fn test_delivery_schema_ordering() {
        let row = shape(&FeaturePayload::new(), Mode::Delivery);
        assert_eq!(row.columns[4], "delivery_distance_km");
        // delivery lists day_type before hour_bucket, unlike pickup
        assert_eq!(row.columns[13], "day_type");
        assert_eq!(row.columns[14], "hour_bucket");
    }
}
