//! Fixed per-mode feature schemas recorded at training time.
//!
//! Each mode expects exactly these columns, in this order, when a row is
//! handed to its scoring function. The categorical subsets are always
//! represented as text, even when a value looks numeric.

use crate::types::Mode;

pub const PICKUP_COLUMNS: [&str; 15] = [
    "city",
    "lng",
    "lat",
    "aoi_type",
    "pickup_distance_km",
    "accept_hour",
    "pickup_hour",
    "accept_day",
    "pickup_day",
    "accept_month",
    "pickup_month",
    "accept_date",
    "pickup_date",
    "hour_bucket",
    "day_type",
];

pub const DELIVERY_COLUMNS: [&str; 15] = [
    "city",
    "lng",
    "lat",
    "aoi_type",
    "delivery_distance_km",
    "accept_hour",
    "delivery_hour",
    "accept_day",
    "delivery_day",
    "accept_month",
    "delivery_month",
    "accept_date",
    "delivery_date",
    "day_type",
    "hour_bucket",
];

const PICKUP_CATEGORICAL: [&str; 5] =
    ["city", "accept_date", "pickup_date", "hour_bucket", "day_type"];

const DELIVERY_CATEGORICAL: [&str; 5] =
    ["city", "accept_date", "delivery_date", "day_type", "hour_bucket"];

pub fn expected_columns(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Pickup => &PICKUP_COLUMNS,
        Mode::Delivery => &DELIVERY_COLUMNS,
    }
}

pub fn categorical_columns(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Pickup => &PICKUP_CATEGORICAL,
        Mode::Delivery => &DELIVERY_CATEGORICAL,
    }
}

pub fn is_categorical(mode: Mode, column: &str) -> bool {
    categorical_columns(mode).contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_have_fifteen_columns() {
        assert_eq!(expected_columns(Mode::Pickup).len(), 15);
        assert_eq!(expected_columns(Mode::Delivery).len(), 15);
    }

    #[test]
    fn test_categorical_columns_are_expected_columns() {
        for mode in [Mode::Pickup, Mode::Delivery] {
            for col in categorical_columns(mode) {
                assert!(
                    expected_columns(mode).contains(col),
                    "{col} not in {mode} schema"
                );
            }
        }
    }
}
