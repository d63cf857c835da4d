//! The refresh loop.
//!
//! Each cycle fetches, normalizes, extracts, renders, displays and logs one
//! frame, then waits out the cadence at the loop's cancellation check point.
//! A stop request that lands while the tool is running is seen as soon as
//! the fetch returns, before anything is drawn.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, error, info};

use crate::data::{merge, unmapped_keys, CanonicalObservation, DisplayMetrics};
use crate::logging::DashboardLog;
use crate::source::{DiagnosticsSource, Mode, RawObservation};
use crate::ui::{render, Dashboard, Palette};

/// Time between the end of one cycle and the start of the next.
pub const CADENCE: Duration = Duration::from_secs(1);

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The operator asked to stop.
    Interrupted,
    /// A cycle failed with an unrecoverable error.
    Failed(String),
}

/// Refresh loop state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped(StopReason),
}

/// Cancellation check point: a blocking wait once per cycle, plus a
/// non-blocking check after every fetch.
pub trait Shutdown {
    /// Wait out `cadence`, returning `true` if the loop should stop.
    fn should_stop(&mut self, cadence: Duration) -> bool;

    /// Returns `true` if a stop has already been requested, without waiting.
    fn interrupted(&mut self) -> bool {
        false
    }
}

impl<F> Shutdown for F
where
    F: FnMut(Duration) -> bool,
{
    fn should_stop(&mut self, cadence: Duration) -> bool {
        self(cadence)
    }
}

/// Shutdown driven by Ctrl+C.
///
/// The signal handler only sends on a channel; the loop observes it after
/// each fetch and while waiting out the cadence, so a frame is never
/// interrupted half-drawn. Once seen, the request sticks.
#[derive(Debug)]
pub struct SignalShutdown {
    receiver: Receiver<()>,
    requested: bool,
}

impl SignalShutdown {
    /// Install the process-wide Ctrl+C handler.
    pub fn install() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })?;
        Ok(Self::new(rx))
    }

    /// Wrap an existing interrupt channel.
    pub fn new(receiver: Receiver<()>) -> Self {
        Self {
            receiver,
            requested: false,
        }
    }
}

impl Shutdown for SignalShutdown {
    fn should_stop(&mut self, cadence: Duration) -> bool {
        if self.interrupted() {
            return true;
        }
        match self.receiver.recv_timeout(cadence) {
            Ok(()) => {
                self.requested = true;
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(cadence);
                false
            }
        }
    }

    fn interrupted(&mut self) -> bool {
        if !self.requested {
            self.requested = self.receiver.try_recv().is_ok();
        }
        self.requested
    }
}

/// Drives the poll, normalize, render cycle.
pub struct RefreshLoop<S, T, L>
where
    S: DiagnosticsSource,
    T: Write,
    L: Write,
{
    source: S,
    mode: Mode,
    palette: Palette,
    terminal: T,
    frame_log: DashboardLog<L>,
    state: LoopState,
    cycles: u64,
}

impl<S, T, L> RefreshLoop<S, T, L>
where
    S: DiagnosticsSource,
    T: Write,
    L: Write,
{
    pub fn new(
        source: S,
        mode: Mode,
        palette: Palette,
        terminal: T,
        frame_log: DashboardLog<L>,
    ) -> Self {
        Self {
            source,
            mode,
            palette,
            terminal,
            frame_log,
            state: LoopState::Running,
            cycles: 0,
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn frame_log(&self) -> &DashboardLog<L> {
        &self.frame_log
    }

    /// Fetch this cycle's observations and merge them.
    ///
    /// The ping drop observation is fetched only when the mode shows
    /// outages; otherwise the status observation stands in for it.
    pub fn observe(&mut self) -> CanonicalObservation {
        self.observe_until(&mut |_: Duration| false).unwrap_or_default()
    }

    /// Like [`observe`](Self::observe), but gives up with `None` as soon as
    /// `shutdown` reports a stop request after a fetch.
    fn observe_until<D: Shutdown + ?Sized>(
        &mut self,
        shutdown: &mut D,
    ) -> Option<CanonicalObservation> {
        let status = self.fetch(Mode::Status, shutdown)?;
        let ping = if self.mode.needs_ping_fetch() {
            self.fetch(Mode::PingDrop, shutdown)?
        } else {
            status.clone()
        };
        debug!("Status data: {}", to_json(&status));
        debug!("Ping data: {}", to_json(&ping));

        let unmapped: BTreeSet<&str> =
            unmapped_keys(&status).into_iter().chain(unmapped_keys(&ping)).collect();
        if !unmapped.is_empty() {
            debug!("Unmapped keys: {:?}", unmapped);
        }

        Some(merge(&status, &ping))
    }

    /// Fetch one observation. A failure is only reported when no stop was
    /// requested meanwhile; the tool dies on Ctrl+C as well.
    fn fetch<D: Shutdown + ?Sized>(&mut self, mode: Mode, shutdown: &mut D) -> Option<RawObservation> {
        let raw = self.source.fetch(mode);
        if shutdown.interrupted() {
            return None;
        }
        if let Some(e) = self.source.error() {
            error!("Error fetching {} data: {}", mode, e);
        }
        Some(raw)
    }

    /// Run one full cycle and return the frame it drew.
    pub fn cycle(&mut self) -> Result<Dashboard> {
        let canonical = self.observe();
        self.draw(&canonical)
    }

    fn draw(&mut self, canonical: &CanonicalObservation) -> Result<Dashboard> {
        let metrics = DisplayMetrics::extract(canonical);
        let frame = render(&metrics, self.mode, &self.palette);
        self.display(&frame)?;
        self.frame_log.record(&frame)?;
        self.cycles += 1;
        Ok(frame)
    }

    /// Run cycles until `shutdown` says stop or a cycle fails.
    pub fn run<D: Shutdown + ?Sized>(&mut self, shutdown: &mut D) -> StopReason {
        loop {
            if let LoopState::Stopped(reason) = &self.state {
                return reason.clone();
            }
            let Some(canonical) = self.observe_until(shutdown) else {
                self.stop(StopReason::Interrupted);
                continue;
            };
            match self.draw(&canonical) {
                Ok(_) => {
                    if shutdown.should_stop(CADENCE) {
                        self.stop(StopReason::Interrupted);
                    }
                }
                Err(e) => self.stop(StopReason::Failed(format!("{:#}", e))),
            }
        }
    }

    fn stop(&mut self, reason: StopReason) {
        match &reason {
            StopReason::Interrupted => info!("Monitor stopped by user"),
            StopReason::Failed(message) => error!("Unexpected error: {}", message),
        }
        self.state = LoopState::Stopped(reason);
    }

    /// Overwrite the previous frame from the top-left corner.
    fn display(&mut self, frame: &Dashboard) -> io::Result<()> {
        queue!(self.terminal, MoveTo(0, 0))?;
        for (i, line) in frame.lines().iter().enumerate() {
            if i > 0 {
                queue!(self.terminal, Print("\n"))?;
            }
            queue!(self.terminal, Print(line), Clear(ClearType::UntilNewLine))?;
        }
        self.terminal.flush()
    }
}

fn to_json(raw: &RawObservation) -> String {
    serde_json::to_string(raw).unwrap_or_default()
}
