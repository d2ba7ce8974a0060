use anyhow::Result;
use clap::Parser;
use link_model::SweepConfig;
use link_sim::{FrameReceiver, LoopStatus, ParameterStore, SimConfig, SimulationLoop};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ParameterStore>,
    pub frames: FrameReceiver,
    pub status: LoopStatus,
    pub sweep: SweepConfig,
}

#[derive(Parser, Debug)]
#[command(
    name = "fso-gateway",
    about = "Real-time FSO link simulator with HTTP control and render endpoints"
)]
struct Args {
    /// JSON simulation config (missing fields use defaults)
    #[arg(short, long, env = "FSO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, env = "FSO_GATEWAY_PORT", default_value_t = 18610)]
    port: u16,

    /// Override the tick interval in milliseconds
    #[arg(long, env = "FSO_TICK_MS")]
    tick_ms: Option<u64>,

    /// Seed the noise generator for reproducible traces
    #[arg(long, env = "FSO_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "fso_gateway=debug,link_sim=info,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("   Loading config from {}", path.display());
            SimConfig::from_file(path)?
        }
        None => SimConfig::default(),
    };
    if let Some(ms) = args.tick_ms {
        config.tick_interval_ms = ms;
    }
    config.validate()?;

    let store = Arc::new(ParameterStore::new(config.initial));
    let mut sim = SimulationLoop::new(&config, store.reader());
    if let Some(seed) = args.seed {
        sim = sim.with_seed(seed);
    }

    let state = AppState {
        store,
        frames: sim.frames(),
        status: sim.status(),
        sweep: config.sweep,
    };

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let sim_handle = sim.spawn(async move {
        let _ = stop_rx.await;
    });

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("FSO gateway starting on {}", addr);
    tracing::info!(
        "   Tick: {} ms, spatial resolution: {}, BER window: {}",
        config.tick_interval_ms,
        config.spatial_resolution,
        config.error_trace_len
    );
    tracing::info!(
        "   Initial link: {:.0} m, {} / {}",
        config.initial.distance_m,
        config.initial.weather,
        config.initial.modulation
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(());
    match sim_handle.await? {
        Ok(()) => tracing::info!("Shutdown complete"),
        Err(e) => tracing::warn!("Simulation loop had already stopped: {}", e),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
