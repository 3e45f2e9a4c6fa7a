use axum::http::Method;
use clap::Parser;
use log::{debug, error, info};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use api::service_controller::ServiceController;
use config::Config;
use provider::JupiterApiProvider;

mod utils;

#[derive(Parser, Debug)]
struct Args {
    /// Serve the loaded data over HTTP
    #[arg(short, long)]
    serve: bool,

    /// Print the direct routes of this mint once loaded
    #[arg(short, long)]
    mint: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    simple_logger::SimpleLogger::new().env().init().unwrap();

    let args = Args::parse();
    debug!("Args: {:?}", args);

    // Load configuration from yaml
    let config = Config::from_file(&args.config).expect("Failed to load config file");

    // The base path override is read from the environment once, here
    let provider =
        JupiterApiProvider::from_config(&config.jupiter).expect("Failed to build Jupiter clients");
    info!("Using Jupiter API at {}", provider.api().base_path());

    provider.mount();

    if args.serve {
        run_server(config, provider).await;
    } else {
        run_once(provider, args.mint).await;
    }
}

async fn run_once(provider: JupiterApiProvider, mint: Option<String>) {
    if let Err(e) = provider.wait_until_settled().await {
        error!("Loading Jupiter data failed: {}", e);
        std::process::exit(1);
    }

    let report = provider.scope(async { utils::summarize(mint.as_deref()) }).await;
    match report {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(e) => error!("Failed to read Jupiter data: {}", e),
    }

    provider.unmount();
}

async fn run_server(config: Config, provider: JupiterApiProvider) {
    info!("Starting Jupiter Provider Server");

    let (app_host, app_port) = (config.server.host.clone(), config.server.port);

    let service_controller = ServiceController::new(provider.clone());

    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);

    let app = service_controller.router().layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", app_host, app_port))
        .await
        .expect("Failed to bind port");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    provider.unmount();

    info!("Server stopped.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Unable to handle ctrl+c");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
