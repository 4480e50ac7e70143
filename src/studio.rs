//! View router and application state
//!
//! `Studio` owns everything the screens need: the active view, the
//! workspace, the library and the orchestrator. The shell holds the only
//! instance and passes it to renderers by reference.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::{ContentProvider, RemoteContentService};
use crate::config::Config;
use crate::design::{DesignConfig, HomeStyle};
use crate::errors::{ApiError, GenerationError, StudioError};
use crate::library::{GeneratedDesign, Library};
use crate::orchestrator::{GenerationKind, GenerationOutcome, Orchestrator, Progress, Workspace};
use crate::random::{thread_random, SharedRandom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Generate,
    Library,
    Compare,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Generate => "Generate",
            View::Library => "Library",
            View::Compare => "Compare",
        }
    }
}

pub struct Studio {
    view: View,
    workspace: Workspace,
    library: Library,
    orchestrator: Orchestrator,
    last_error: Option<String>,
}

impl Studio {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        rng: SharedRandom,
        tick_interval: Duration,
    ) -> Self {
        Self {
            view: View::Home,
            workspace: Workspace::new(DesignConfig::default()),
            library: Library::new(rng),
            orchestrator: Orchestrator::new(provider, tick_interval),
            last_error: None,
        }
    }

    /// Studio wired to the remote backends named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let provider = Arc::new(RemoteContentService::from_config(config)?);
        Ok(Self::new(provider, thread_random(), config.tick_interval()))
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Mutable access for parameter edits.
    pub fn config_mut(&mut self) -> &mut DesignConfig {
        &mut self.workspace.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.orchestrator.subscribe()
    }

    pub fn progress(&self) -> Progress {
        self.orchestrator.progress()
    }

    pub fn is_generating(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Message of the most recent failed run, cleared by the next run.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            debug!(from = self.view.label(), to = view.label(), "Navigate");
        }
        self.view = view;
    }

    /// Start a fresh workspace from a gallery template and queue the
    /// automatic first generation.
    pub fn select_template(&mut self, style: HomeStyle) {
        info!(style = style.label(), "Template selected");
        self.workspace.clear_results();
        self.workspace.config = DesignConfig::from_template(style);
        self.workspace.arm_auto_generate();
        self.last_error = None;
        self.navigate(View::Generate);
    }

    /// Called once the workspace is on screen. Runs the queued automatic
    /// generation, if any; later calls do nothing.
    pub async fn open_workspace(
        &mut self,
    ) -> Option<Result<GenerationOutcome, GenerationError>> {
        if !self.workspace.take_auto_generate() {
            return None;
        }
        Some(self.generate(GenerationKind::Both).await)
    }

    pub async fn generate(
        &mut self,
        kind: GenerationKind,
    ) -> Result<GenerationOutcome, GenerationError> {
        if self.orchestrator.is_busy() {
            return Err(GenerationError::Busy);
        }
        self.workspace.begin_generation();
        self.last_error = None;

        let result = self.orchestrator.run(&self.workspace.config, kind).await;
        match &result {
            Ok(outcome) => self.workspace.apply(outcome),
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }

    /// Snapshot the workspace into the library and show the library.
    pub fn save_workspace(&mut self) -> Result<&GeneratedDesign, StudioError> {
        if self.orchestrator.is_busy() {
            return Err(StudioError::GenerationInFlight);
        }
        if !self.workspace.has_result() {
            return Err(StudioError::NothingToSave);
        }

        self.view = View::Library;
        let ws = &self.workspace;
        Ok(self.library.save(
            ws.config.clone(),
            ws.blueprint().map(str::to_string),
            ws.exterior().map(str::to_string),
            ws.generation_time(),
        ))
    }

    /// Reopen a saved design in the workspace without regenerating.
    pub fn edit_design(&mut self, id: &str) -> Result<(), StudioError> {
        let design = self.library.resolve(id)?.clone();
        info!(id = %design.id, "Editing saved design");
        self.workspace.restore(
            design.config,
            design.blueprint_url,
            design.exterior_url,
            design.generation_time,
        );
        self.workspace.disarm_auto_generate();
        self.last_error = None;
        self.navigate(View::Generate);
        Ok(())
    }

    /// Delete by id or unique prefix; returns the full id removed.
    pub fn delete_design(&mut self, id: &str) -> Result<String, StudioError> {
        let full_id = self.library.resolve(id)?.id.clone();
        self.library.delete(&full_id);
        Ok(full_id)
    }
}
