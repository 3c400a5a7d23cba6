use std::env;

/// Runtime settings, read from environment variables with development
/// defaults matching the artifact names produced by the training pipeline.
#[derive(Debug, Clone)]
pub struct Settings {
    pub pickup_model_path: String,
    pub pickup_meta_path: String,
    pub delivery_model_path: String,
    pub delivery_meta_path: String,
    pub pickup_scaling_path: String,
    pub delivery_scaling_path: String,
    pub eta_scaling_path: String,
    pub port: u16,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            pickup_model_path: var_or("PICKUP_MODEL_PATH", "pickup_eta_model.pt"),
            pickup_meta_path: var_or("PICKUP_META_PATH", "pickup_eta_meta.json"),
            delivery_model_path: var_or("DELIVERY_MODEL_PATH", "delivery_eta_model.pt"),
            delivery_meta_path: var_or("DELIVERY_META_PATH", "delivery_eta_meta.json"),
            pickup_scaling_path: var_or("PICKUP_SCALING_PATH", "pickup_scaling_params.json"),
            delivery_scaling_path: var_or("DELIVERY_SCALING_PATH", "delivery_scaling_params.json"),
            eta_scaling_path: var_or("ETA_SCALING_PATH", "eta_scaling_params.json"),
            port: env::var("ETA_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
        }
    }
}
