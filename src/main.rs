use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::fmt::format::FmtSpan;

use reputation_proofs::{
    ProofDecoder, ProofService, ProofsApiState, ProofsConfig, SourceMode, build_record_source,
    create_proofs_router,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first - this validates the explorer and register settings
    let config = ProofsConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {:#}", e);
        eprintln!("Please check the PROOFS_* environment variables.");
        e
    })?;

    init_logging(&config)?;

    info!("Starting reputation proof service");
    info!(
        "Source mode: {}, owner register: {}, expended register: {}, assignment registers: {:?}",
        config.source.mode,
        config.registers.owner_register,
        config.registers.expended_register,
        config.registers.assignment_registers
    );

    if config.source.mode == SourceMode::Demo {
        warn!("Demo source mode enabled - listings are randomly generated");
    } else {
        info!(
            "Explorer: {} (template {})",
            config.explorer.url, config.explorer.contract_template_hash
        );
    }

    let source = build_record_source(&config).context("Failed to create record source")?;
    let service = ProofService::new(source, ProofDecoder::new(config.registers.clone()));

    let app = Router::new()
        .merge(create_proofs_router(ProofsApiState { service }))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!("Reputation proof service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &ProofsConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(if config.logging.log_requests {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
