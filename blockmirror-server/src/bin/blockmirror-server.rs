use blockmirror_server::api::run_server;
use blockmirror_server::config::ServerConfig;
use blockmirror_server::state::ApiState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let state = ApiState::from_config(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    log::info!("server running on port {}", config.port);
    run_server(state, ("0.0.0.0", config.port)).await
}
