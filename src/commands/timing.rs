//! Timing decorator for commands

use std::time::{Duration, Instant};

use tracing::info;

use crate::error::LedgerResult;
use crate::services::LedgerService;

use super::{Command, CommandState, Outcome, UndoOutcome};

/// Wraps any command and logs how long `execute` and `undo` take
///
/// Results and errors pass through unchanged.
#[derive(Debug)]
pub struct Timed<C> {
    inner: C,
    last_elapsed: Option<Duration>,
}

impl<C: Command> Timed<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last_elapsed: None,
        }
    }

    /// Duration of the most recent `execute` or `undo`
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last_elapsed
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Command> Command for Timed<C> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn state(&self) -> CommandState {
        self.inner.state()
    }

    fn execute(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<Outcome> {
        let started = Instant::now();
        let result = self.inner.execute(ledger);
        let elapsed = started.elapsed();
        self.last_elapsed = Some(elapsed);

        info!(
            command = %self.inner.name(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            ok = result.is_ok(),
            "command executed"
        );
        result
    }

    fn undo(&mut self, ledger: &mut dyn LedgerService) -> LedgerResult<UndoOutcome> {
        let started = Instant::now();
        let result = self.inner.undo(ledger);
        let elapsed = started.elapsed();
        self.last_elapsed = Some(elapsed);

        info!(
            command = %self.inner.name(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            ok = result.is_ok(),
            "command undone"
        );
        result
    }

    fn records_history(&self) -> bool {
        self.inner.records_history()
    }
}
