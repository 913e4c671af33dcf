use productivity_pal::assistant::{Assistant, GeminiClient, Unconfigured};
use productivity_pal::sop::load_sop;
use productivity_pal::{load_data, router, AppState, Config};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    info!(
        "loaded {} entries from {}",
        data.submission_history.len(),
        config.data_path.display()
    );

    let assistant: Arc<dyn Assistant> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiClient::new(
            config.gemini_endpoint.as_str(),
            config.gemini_model.as_str(),
            key.as_str(),
        )?),
        None => {
            warn!("GEMINI_API_KEY not set, chat will answer with a fallback message");
            Arc::new(Unconfigured)
        }
    };
    let sop = load_sop(&config.sop_path).await;

    let state = AppState::new(config.data_path.clone(), data, assistant, sop);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
