use clap::Parser;
use virtual_ta::api::server::serve_api;
use virtual_ta::config::AppConfig;
use virtual_ta::logging::init_logging;

#[derive(Parser)]
#[command(name = "virtual-ta")]
#[command(about = "Virtual TA backend answering course questions with RAG")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = init_logging(Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let host = config.server.host.clone();
    let port = cli.port.unwrap_or(config.server.port);

    if let Err(e) = serve_api(&config, host, port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
