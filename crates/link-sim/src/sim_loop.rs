//! Simulation Loop
//!
//! Periodic driver: Idle -> Running -> Stopped, no pause state.
//!
//! Each tick takes one parameter snapshot, runs the performance model,
//! synthesizes a new spatial trace, rolls the BER window, and publishes an
//! immutable `Frame` to the render sink. The renderer is never called
//! directly; it pulls the latest frame from a watch channel on its own cadence.
//!
//! A failed tick is fatal to the loop. There is no retry: every tick is
//! stateless apart from the BER window.

use chrono::{DateTime, Utc};
use link_model::{LinkParameters, PerformanceMetrics};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::{
    ErrorRateTrace, ParameterReader, Result, SignalSynthesizer, SimConfig, SpatialTrace,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoopState {
    Idle = 0,
    Running = 1,
    Stopped = 2,
}

impl LoopState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => LoopState::Idle,
            1 => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoopState::Idle => "idle",
            LoopState::Running => "running",
            LoopState::Stopped => "stopped",
        }
    }
}

/// Lock-free view of loop progress, cloneable into other tasks
#[derive(Clone)]
pub struct LoopStatus {
    state: Arc<AtomicU8>,
    ticks: Arc<AtomicU64>,
}

impl LoopStatus {
    fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(LoopState::Idle as u8)),
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        LoopState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Completed ticks
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    fn set_state(&self, state: LoopState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Everything the render sink needs for one redraw
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub computed_at: DateTime<Utc>,
    pub params: LinkParameters,
    pub metrics: PerformanceMetrics,
    pub spatial: SpatialTrace,
    /// Scaled BER window, oldest first
    pub error_rate: Vec<f64>,
}

/// `None` until the first tick completes
pub type FrameReceiver = watch::Receiver<Option<Arc<Frame>>>;

pub struct SimulationLoop {
    params: ParameterReader,
    synth: SignalSynthesizer,
    error_trace: ErrorRateTrace,
    ber_display_scale: f64,
    tick_interval: Duration,
    rng: StdRng,
    frames: watch::Sender<Option<Arc<Frame>>>,
    status: LoopStatus,
    tick: u64,
}

impl SimulationLoop {
    pub fn new(config: &SimConfig, params: ParameterReader) -> Self {
        let (frames, _rx) = watch::channel(None);
        Self {
            params,
            synth: SignalSynthesizer::new(config.spatial_resolution),
            error_trace: ErrorRateTrace::new(config.error_trace_len),
            ber_display_scale: config.ber_display_scale,
            tick_interval: config.tick_interval(),
            rng: StdRng::from_entropy(),
            frames,
            status: LoopStatus::new(),
            tick: 0,
        }
    }

    /// Fix the noise source, for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn frames(&self) -> FrameReceiver {
        self.frames.subscribe()
    }

    pub fn status(&self) -> LoopStatus {
        self.status.clone()
    }

    pub fn error_trace(&self) -> &ErrorRateTrace {
        &self.error_trace
    }

    /// Run one tick and publish its frame
    pub fn tick(&mut self) -> Result<Arc<Frame>> {
        let params = self.params.snapshot();
        let metrics = PerformanceMetrics::compute(&params)?;

        let spatial = self.synth.synthesize(
            params.distance_m,
            metrics.received_power_dbm,
            metrics.noise_power,
            &mut self.rng,
        )?;

        self.error_trace.push(metrics.ber * self.ber_display_scale);
        self.tick += 1;

        let frame = Arc::new(Frame {
            tick: self.tick,
            computed_at: Utc::now(),
            params,
            metrics,
            spatial,
            error_rate: self.error_trace.to_vec(),
        });

        self.frames.send_replace(Some(Arc::clone(&frame)));
        self.status.ticks.store(self.tick, Ordering::Release);

        debug!(
            tick = self.tick,
            snr_db = metrics.snr_db,
            ber = metrics.ber,
            "Simulation tick"
        );

        Ok(frame)
    }

    /// Tick on the configured interval until `shutdown` resolves or a tick fails
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.status.set_state(LoopState::Running);
        info!(
            "Simulation loop running every {} ms",
            self.tick_interval.as_millis()
        );

        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break Ok(()),
                _ = interval.tick() => {
                    if let Err(e) = self.tick() {
                        error!(tick = self.tick + 1, "Simulation tick failed, stopping loop: {}", e);
                        break Err(e);
                    }
                }
            }
        };

        self.status.set_state(LoopState::Stopped);
        info!("Simulation loop stopped after {} ticks", self.tick);
        outcome
    }

    pub fn spawn<F>(self, shutdown: F) -> JoinHandle<Result<()>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(self.run(shutdown))
    }
}
