//! Generation orchestrator
//!
//! Drives one design generation through its phases:
//!
//! ```text
//! Idle ──► Validating ──► Fetching ──► Done
//!   │          │              │
//!   └──────────┴──────────────┴──► Failed (idle, with an error)
//! ```
//!
//! Validating only happens when the notes are non-blank. For `Both`, the
//! blueprint and exterior fetches run concurrently and must both succeed
//! before anything is published. Progress (phase, step message, live
//! elapsed time) is broadcast on a `watch` channel; a ticker task refreshes
//! the elapsed time while a run is in flight and the value freezes at the
//! measured duration once the run settles.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::query::{blueprint_query, exterior_query};
use crate::api::types::ImageRef;
use crate::api::ContentProvider;
use crate::design::DesignConfig;
use crate::errors::GenerationError;
use crate::observability::telemetry::{record_state_transition, track_generation};

pub const STEP_VALIDATING: &str = "Validating instructions...";

/// What a generation run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Blueprint,
    Exterior,
    Both,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Blueprint => "blueprint",
            GenerationKind::Exterior => "exterior",
            GenerationKind::Both => "both",
        }
    }

    pub fn step_message(self) -> &'static str {
        match self {
            GenerationKind::Blueprint => "Drafting architectural blueprint...",
            GenerationKind::Exterior => "Rendering photorealistic exterior...",
            GenerationKind::Both => "Generating blueprint and exterior...",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blueprint" | "bp" | "plan" => Ok(GenerationKind::Blueprint),
            "exterior" | "ext" => Ok(GenerationKind::Exterior),
            "both" | "all" | "" => Ok(GenerationKind::Both),
            other => Err(format!(
                "Unknown generation kind '{}' (expected blueprint, exterior or both)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Fetching,
    Done,
    /// Back to idle with the error kept in `Progress::error`.
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Validating | Phase::Fetching)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Validating => "Validating",
            Phase::Fetching => "Fetching",
            Phase::Done => "Done",
            Phase::Failed => "Failed",
        }
    }
}

/// Snapshot of the current run, as seen by progress subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub run: u64,
    pub phase: Phase,
    pub step: String,
    pub elapsed: Duration,
    pub error: Option<String>,
}

impl Progress {
    fn idle() -> Self {
        Self {
            run: 0,
            phase: Phase::Idle,
            step: String::new(),
            elapsed: Duration::ZERO,
            error: None,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// The images produced by a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub kind: GenerationKind,
    pub blueprint: Option<ImageRef>,
    pub exterior: Option<ImageRef>,
    /// Seconds from request start to the last fetch completing
    pub generation_time: f64,
}

/// The transient generation session: the active config and its most recent
/// result.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub config: DesignConfig,
    blueprint: Option<ImageRef>,
    exterior: Option<ImageRef>,
    generation_time: Option<f64>,
    auto_generate: bool,
}

impl Workspace {
    pub fn new(config: DesignConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn blueprint(&self) -> Option<&str> {
        self.blueprint.as_deref()
    }
    pub fn exterior(&self) -> Option<&str> {
        self.exterior.as_deref()
    }
    pub fn generation_time(&self) -> Option<f64> {
        self.generation_time
    }

    /// True when there is at least one image worth saving.
    pub fn has_result(&self) -> bool {
        self.blueprint.is_some() || self.exterior.is_some()
    }

    pub fn clear_results(&mut self) {
        self.blueprint = None;
        self.exterior = None;
        self.generation_time = None;
    }

    /// Replace everything with a previously saved state.
    pub fn restore(
        &mut self,
        config: DesignConfig,
        blueprint: Option<ImageRef>,
        exterior: Option<ImageRef>,
        generation_time: Option<f64>,
    ) {
        self.config = config;
        self.blueprint = blueprint;
        self.exterior = exterior;
        self.generation_time = generation_time;
    }

    /// A new run invalidates the previous timing but keeps the images on
    /// screen until the run succeeds.
    pub fn begin_generation(&mut self) {
        self.generation_time = None;
    }

    /// Publish a run's images. A single-target run only replaces its own
    /// image.
    pub fn apply(&mut self, outcome: &GenerationOutcome) {
        if let Some(ref bp) = outcome.blueprint {
            self.blueprint = Some(bp.clone());
        }
        if let Some(ref ext) = outcome.exterior {
            self.exterior = Some(ext.clone());
        }
        self.generation_time = Some(outcome.generation_time);
    }

    pub fn arm_auto_generate(&mut self) {
        self.auto_generate = true;
    }

    pub fn disarm_auto_generate(&mut self) {
        self.auto_generate = false;
    }

    pub fn is_auto_generate_armed(&self) -> bool {
        self.auto_generate
    }

    /// Consume the auto-generate flag; true at most once per arming.
    pub fn take_auto_generate(&mut self) -> bool {
        std::mem::take(&mut self.auto_generate)
    }
}

/// Aborts the ticker task when the run settles, on every exit path.
struct TickerGuard(JoinHandle<()>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct Orchestrator {
    provider: Arc<dyn ContentProvider>,
    progress: Arc<watch::Sender<Progress>>,
    tick_interval: Duration,
    next_run: AtomicU64,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn ContentProvider>, tick_interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(Progress::idle());
        Self {
            provider,
            progress: Arc::new(tx),
            tick_interval,
            next_run: AtomicU64::new(1),
        }
    }

    /// Live progress feed.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    pub fn progress(&self) -> Progress {
        self.progress.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.progress.borrow().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase().is_in_flight()
    }

    /// Run one generation for `config`.
    ///
    /// Rejected with `Busy` while another run is in flight; no remote call is
    /// made in that case.
    pub async fn run(
        &self,
        config: &DesignConfig,
        kind: GenerationKind,
    ) -> Result<GenerationOutcome, GenerationError> {
        let first_phase = if config.has_custom_instructions() {
            Phase::Validating
        } else {
            Phase::Fetching
        };
        let run = self.begin(first_phase, kind)?;
        let start = Instant::now();
        let _ticker = TickerGuard(self.spawn_ticker(run, start));

        let result = track_generation(kind.as_str(), || self.execute(config, kind, start)).await;

        let from = self.phase();
        match &result {
            Ok(outcome) => {
                self.progress.send_modify(|p| {
                    p.phase = Phase::Done;
                    p.step.clear();
                    p.elapsed = Duration::from_secs_f64(outcome.generation_time);
                    p.error = None;
                });
                record_state_transition(from.as_str(), Phase::Done.as_str());
            }
            Err(e) => {
                self.progress.send_modify(|p| {
                    p.phase = Phase::Failed;
                    p.step.clear();
                    p.elapsed = start.elapsed();
                    p.error = Some(e.to_string());
                });
                record_state_transition(from.as_str(), Phase::Failed.as_str());
            }
        }
        result
    }

    /// Atomically claim the orchestrator for a new run.
    fn begin(&self, first_phase: Phase, kind: GenerationKind) -> Result<u64, GenerationError> {
        let run = self.next_run.fetch_add(1, Ordering::Relaxed);
        let step = if first_phase == Phase::Validating {
            STEP_VALIDATING
        } else {
            kind.step_message()
        };
        let mut previous = Phase::Idle;
        let claimed = self.progress.send_if_modified(|p| {
            if p.phase.is_in_flight() {
                return false;
            }
            previous = p.phase;
            *p = Progress {
                run,
                phase: first_phase,
                step: step.to_string(),
                elapsed: Duration::ZERO,
                error: None,
            };
            true
        });
        if !claimed {
            debug!("Generation requested while another is in flight");
            return Err(GenerationError::Busy);
        }
        record_state_transition(previous.as_str(), first_phase.as_str());
        Ok(run)
    }

    fn transition(&self, phase: Phase, step: &str) {
        let from = self.phase();
        if from == phase {
            return;
        }
        self.progress.send_modify(|p| {
            p.phase = phase;
            p.step = step.to_string();
        });
        record_state_transition(from.as_str(), phase.as_str());
    }

    fn spawn_ticker(&self, run: u64, start: Instant) -> JoinHandle<()> {
        let tx = Arc::clone(&self.progress);
        let interval = self.tick_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                // Only the live run is updated; a settled value stays frozen.
                tx.send_if_modified(|p| {
                    if p.run == run && p.phase.is_in_flight() {
                        p.elapsed = start.elapsed();
                        true
                    } else {
                        false
                    }
                });
            }
        })
    }

    async fn execute(
        &self,
        config: &DesignConfig,
        kind: GenerationKind,
        start: Instant,
    ) -> Result<GenerationOutcome, GenerationError> {
        if config.has_custom_instructions() {
            self.transition(Phase::Validating, STEP_VALIDATING);
            if !self.provider.classify(config.custom_instructions()).await {
                return Err(GenerationError::ValidationRejected);
            }
        }

        self.transition(Phase::Fetching, kind.step_message());
        let (blueprint, exterior) = match kind {
            GenerationKind::Both => {
                let bp_query = blueprint_query(config);
                let ext_query = exterior_query(config);
                let (bp, ext) = tokio::try_join!(
                    self.provider.fetch_image(&bp_query),
                    self.provider.fetch_image(&ext_query),
                )
                .map_err(GenerationError::failed)?;
                (Some(bp), Some(ext))
            }
            GenerationKind::Blueprint => {
                let bp = self
                    .provider
                    .fetch_image(&blueprint_query(config))
                    .await
                    .map_err(GenerationError::failed)?;
                (Some(bp), None)
            }
            GenerationKind::Exterior => {
                let ext = self
                    .provider
                    .fetch_image(&exterior_query(config))
                    .await
                    .map_err(GenerationError::failed)?;
                (None, Some(ext))
            }
        };

        Ok(GenerationOutcome {
            kind,
            blueprint,
            exterior,
            generation_time: start.elapsed().as_secs_f64(),
        })
    }
}
