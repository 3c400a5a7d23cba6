//! ETA prediction service: exposes pretrained pickup/delivery regression
//! models over HTTP, adapting loose client input into the fixed schema each
//! model expects and scaling the normalized output back to minutes.

pub mod config;
pub mod model;
pub mod payload;
pub mod predict;
pub mod scaling;
pub mod schema;
pub mod server;
pub mod types;
