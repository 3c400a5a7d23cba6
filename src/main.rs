use std::net::SocketAddr;
use std::sync::Arc;

use eta_predictor::config::Settings;
use eta_predictor::predict::Predictor;
use eta_predictor::server::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env();
    let predictor = Predictor::load(&settings)?;

    let state = AppState {
        predictor: Arc::new(predictor),
    };
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
