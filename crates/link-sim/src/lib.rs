//! FSO Link Simulation
//!
//! Real-time driver for the `link-model` performance model:
//! - `ParameterStore` publishes whole parameter snapshots (single writer)
//! - `SimulationLoop` ticks on a fixed interval on its own tokio task
//! - Each tick synthesizes a spatial intensity profile and rolls the BER trace
//! - Frames are handed to the render sink through a watch channel
//!
//! ```text
//! UI ──send_replace──> ParameterStore ──snapshot──> SimulationLoop ──Arc<Frame>──> render sink
//! ```

use thiserror::Error;

pub mod config;
pub mod signal;
pub mod sim_loop;
pub mod store;
pub mod trace;

pub use config::SimConfig;
pub use signal::SignalSynthesizer;
pub use sim_loop::{Frame, FrameReceiver, LoopState, LoopStatus, SimulationLoop};
pub use store::{ParameterReader, ParameterStore};
pub use trace::{ErrorRateTrace, SpatialSample, SpatialTrace};

pub use link_model;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Model error: {0}")]
    Model(#[from] link_model::ModelError),
    #[error("Signal synthesis failed: {0}")]
    Signal(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
