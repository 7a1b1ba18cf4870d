mod args;
mod config;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use cur_report::ReportConfig;
use cur_store::{S3Config, S3Store};
use http_api::HttpState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let loaded = config::load_or_create(args.config.as_deref()).map_err(io::Error::other)?;
    if loaded.created {
        info!(file = %loaded.file.display(), "created default config; set `bucket` before use");
    }
    let cli_config = loaded.config;

    if cli_config.bucket.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no bucket configured in {}", loaded.file.display()),
        )
        .into());
    }

    let api_key = std::env::var("VALID_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "VALID_API_KEY must be set to a non-empty secret",
        )
        .into());
    }

    let store = S3Store::new(S3Config {
        bucket: cli_config.bucket.clone(),
        region: cli_config.region.clone(),
        endpoint: cli_config.endpoint.clone(),
        force_path_style: cli_config.force_path_style,
    })
    .await;

    let report_config = ReportConfig {
        prefix: cli_config.prefix.clone(),
        delimiter: cli_config.delimiter.clone(),
        archive_suffix: cli_config.archive_suffix.clone(),
        delete_old_reports: cli_config.delete_old_reports,
    };

    let state = HttpState::new(Arc::new(store), report_config, api_key);
    let router = http_api::router(state);

    let port = args.port.unwrap_or(cli_config.port);
    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    if used_fallback {
        info!("configured port {port} was unavailable; using {actual_port} for this run");
    }
    info!(
        bucket = %cli_config.bucket,
        prefix = %cli_config.prefix,
        "CUR Reporter is listening on http://127.0.0.1:{actual_port}"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
