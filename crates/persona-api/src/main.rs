use tracing_subscriber::EnvFilter;

use persona_api::config::ServerConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = config.build_state();

    tracing::info!(
        bind_addr = %config.bind_addr,
        data_dir = ?config.data_dir,
        llm_enabled = config.llm.is_some(),
        "starting persona api"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, persona_api::app(state)).await?;
    Ok(())
}
