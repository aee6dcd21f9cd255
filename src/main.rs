use youtube_downloader_server::config::ServerConfig;
use youtube_downloader_server::logging::init_logging;
use youtube_downloader_server::{run, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    init_logging(config.debug)?;
    run(config).await
}
