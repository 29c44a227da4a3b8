//! Script-driven drawing sessions.
//!
//! A session owns one [`DrawingSurface`] and the current [`ToolSelection`],
//! feeds it the commands of a [`Script`] on the calling thread, and presents
//! the outcome of every persist request as a notification.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::export::{self, ExportConfig};
use crate::input::{DrawingSurface, PointerEvent, ToolChange, ToolSelection};
use crate::notification::{Notifier, toast_for};
use crate::persist::{PersistManager, PersistOutcome};
use crate::script::{Command, Script, Step};


/// Counters collected while running a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Strokes committed by a pointer-up
    pub strokes: usize,
    /// Successful `export` commands
    pub exports: usize,
    /// Persist requests that were stored
    pub saved: usize,
    /// Persist requests that failed
    pub failed: usize,
    /// Path written by the latest export
    pub last_export: Option<PathBuf>,
}

pub struct Session {
    surface: DrawingSurface,
    selection: ToolSelection,
    owner: Option<String>,
    export: ExportConfig,
    persist: PersistManager,
    notifier: Box<dyn Notifier>,
    runtime: tokio::runtime::Handle,
    summary: RunSummary,
}

impl Session {
    /// Creates a session around `surface`.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime the persist requests run on; must not
    ///   be the runtime driving the current thread
    pub fn new(
        surface: DrawingSurface,
        selection: ToolSelection,
        persist: PersistManager,
        notifier: Box<dyn Notifier>,
        runtime_handle: &tokio::runtime::Handle,
    ) -> Self {
        Self {
            surface,
            selection,
            owner: None,
            export: ExportConfig::default(),
            persist,
            notifier,
            runtime: runtime_handle.clone(),
            summary: RunSummary::default(),
        }
    }

    /// Identity paintings are saved under. Without one, `save` fails.
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn selection(&self) -> &ToolSelection {
        &self.selection
    }

    /// Runs every command of `script` in order, then waits for outstanding
    /// persist requests.
    ///
    /// Outcomes of requests that finished in the meantime are presented
    /// between commands; the rest are presented after the last command.
    ///
    /// Notifications still being delivered are waited for before returning,
    /// whether or not the script succeeded.
    ///
    /// # Errors
    /// Returns an error if a drawing operation or an export fails. Persist
    /// failures are reported through the notifier instead.
    pub fn run(&mut self, script: &Script) -> Result<RunSummary> {
        let result = self.run_steps(script);
        self.notifier.flush();
        result
    }

    fn run_steps(&mut self, script: &Script) -> Result<RunSummary> {
        log::info!("Running script with {} commands", script.len());

        for step in script.steps() {
            self.apply(step)
                .with_context(|| format!("line {}: {}", step.line, step.command))?;
            let ready = self.persist.try_take_outcomes();
            self.present(ready);
        }

        if self.surface.is_drawing() {
            log::warn!("Script ended while drawing; keeping the current preview");
        }

        let remaining = self.runtime.block_on(self.persist.finish());
        self.present(remaining);

        log::info!(
            "Script finished: {} strokes, {} exports, {} saved, {} failed",
            self.summary.strokes,
            self.summary.exports,
            self.summary.saved,
            self.summary.failed
        );
        Ok(self.summary.clone())
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        log::debug!("line {}: {}", step.line, step.command);
        match step.command {
            Command::Tool(tool) => self.change(ToolChange::Tool(tool)),
            Command::Thickness(width) => self.change(ToolChange::Thickness(width)),
            Command::Color(color) => self.change(ToolChange::Color(color)),
            Command::Fill(fill) => self.change(ToolChange::Fill(fill)),
            Command::Down(point) => self.pointer(PointerEvent::Down(point))?,
            Command::Move(point) => self.pointer(PointerEvent::Move(point))?,
            Command::Up => {
                if self.surface.is_drawing() {
                    self.summary.strokes += 1;
                }
                self.pointer(PointerEvent::Up)?;
            }
            Command::Clear => self.surface.clear()?,
            Command::Export => {
                let png = self.surface.encode_png()?;
                let path = self
                    .runtime
                    .block_on(export::save_image(png, self.export.clone()))?;
                self.summary.exports += 1;
                self.summary.last_export = Some(path);
            }
            Command::Save => {
                let owner = self.owner.as_deref().unwrap_or_default();
                self.surface.persist(owner, &self.persist)?;
            }
        }
        Ok(())
    }

    fn change(&mut self, change: ToolChange) {
        self.selection = self.selection.apply(change);
    }

    fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        self.surface.handle_pointer(event, &self.selection)?;
        Ok(())
    }

    fn present(&mut self, outcomes: Vec<PersistOutcome>) {
        for outcome in outcomes {
            match outcome {
                PersistOutcome::Saved(_) => self.summary.saved += 1,
                PersistOutcome::Failed(_) => self.summary.failed += 1,
            }
            self.notifier.notify(&toast_for(&outcome));
        }
    }
}
