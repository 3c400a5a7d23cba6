//! Command-line companion client: assembles a {mode, features} body with the
//! mode-dependent key names and renders the predicted ETA.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "eta_client", about = "Predict pickup/delivery ETA via the ETA API")]
struct Args {
    /// Base URL of the ETA API
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,
    /// pickup or delivery
    #[arg(long, default_value = "pickup")]
    mode: String,
    #[arg(long, default_value = "Chongqing")]
    city: String,
    #[arg(long, default_value_t = 106.55)]
    lng: f64,
    #[arg(long, default_value_t = 29.56)]
    lat: f64,
    /// AOI type (0/1)
    #[arg(long, default_value_t = 1)]
    aoi_type: i64,
    /// Pickup/delivery distance in km
    #[arg(long, default_value_t = 2.5)]
    distance_km: f64,
    #[arg(long, default_value_t = 10)]
    accept_hour: i64,
    /// Pickup/delivery hour
    #[arg(long, default_value_t = 11)]
    target_hour: i64,
    #[arg(long, default_value_t = 9)]
    accept_day: i64,
    /// Pickup/delivery day of month
    #[arg(long, default_value_t = 9)]
    target_day: i64,
    #[arg(long, default_value_t = 10)]
    accept_month: i64,
    /// Pickup/delivery month
    #[arg(long, default_value_t = 10)]
    target_month: i64,
    #[arg(long, default_value = "2025-10-09")]
    accept_date: String,
    /// Pickup/delivery date
    #[arg(long, default_value = "2025-10-09")]
    target_date: String,
    /// Morning/Afternoon/Evening/Night
    #[arg(long, default_value = "Afternoon")]
    hour_bucket: String,
    /// Weekday/Weekend
    #[arg(long, default_value = "Weekday")]
    day_type: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if args.mode != "pickup" && args.mode != "delivery" {
        bail!("invalid mode '{}': must be 'pickup' or 'delivery'", args.mode);
    }
    let m = &args.mode;

    let mut features = serde_json::Map::new();
    features.insert("city".into(), json!(args.city));
    features.insert("lng".into(), json!(args.lng));
    features.insert("lat".into(), json!(args.lat));
    features.insert("aoi_type".into(), json!(args.aoi_type));
    features.insert(format!("{m}_distance_km"), json!(args.distance_km));
    features.insert("accept_hour".into(), json!(args.accept_hour));
    features.insert(format!("{m}_hour"), json!(args.target_hour));
    features.insert("accept_day".into(), json!(args.accept_day));
    features.insert(format!("{m}_day"), json!(args.target_day));
    features.insert("accept_month".into(), json!(args.accept_month));
    features.insert(format!("{m}_month"), json!(args.target_month));
    features.insert("accept_date".into(), json!(args.accept_date));
    features.insert(format!("{m}_date"), json!(args.target_date));
    features.insert("hour_bucket".into(), json!(args.hour_bucket));
    features.insert("day_type".into(), json!(args.day_type));

    let body = json!({ "mode": m, "features": features });

    let url = format!("{}/predict", args.url.trim_end_matches('/'));
    let resp = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?;

    let status = resp.status();
    let data: Value = resp.json().await.context("response was not JSON")?;
    if !status.is_success() {
        bail!(
            "API error ({}): {}",
            status,
            data.get("error").and_then(Value::as_str).unwrap_or("unknown")
        );
    }

    let eta_minutes = data["eta_minutes"].as_f64().unwrap_or(f64::NAN);
    let hours = (eta_minutes / 60.0).floor() as i64;
    let minutes = (eta_minutes % 60.0).floor() as i64;
    println!("ETA: {eta_minutes:.2} minutes (~{hours}h {minutes}m)");
    println!("Normalized ETA: {}", data["eta_normalized"]);
    println!("Processing time: {} sec", data["processing_time_sec"]);
    Ok(())
}
