//! Real-time driver for a [`Session`].
//!
//! The runner owns the session on a single task. Player actions arrive as
//! [`SessionCommand`]s over an mpsc channel and every state change is
//! published as a [`SessionView`] on a watch channel, so presentation code
//! never touches the session directly.
//!
//! While the session is Active the runner sleeps for the session's current
//! tick interval and then ticks. Commands do not reset the pending deadline.
//! The loop ends on [`SessionCommand::Close`] or once every
//! [`SessionHandle`] has been dropped; no tick fires after that.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::score_store::BestScoreStore;
use crate::session::{Session, SessionPhase, SessionView};

/// Player action forwarded to the runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    /// Leave the Intro phase and start the clock
    AdvanceToActive,
    /// Buy (positive) or sell (negative) shares at the latest price
    Trade(f64),
    /// Return to Intro with a new scenario
    Reset,
    /// Stop the runner
    Close,
}

/// Cloneable handle for sending commands and observing the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    views: watch::Receiver<SessionView>,
}

impl SessionHandle {
    /// Sends a raw command.
    ///
    /// Delivery only fails once the runner has stopped. Commands the session
    /// rejects (a trade outside the Active phase, say) are logged by the
    /// runner and otherwise ignored.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::RunnerStopped)
    }

    /// Starts the clock.
    pub fn advance_to_active(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::AdvanceToActive)
    }

    /// Trades shares at the latest price.
    pub fn trade(&self, shares: f64) -> Result<(), SessionError> {
        self.send(SessionCommand::Trade(shares))
    }

    /// Starts over with a new scenario.
    pub fn reset(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Reset)
    }

    /// Stops the runner.
    pub fn close(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Close)
    }

    /// Subscribes to view updates.
    pub fn views(&self) -> watch::Receiver<SessionView> {
        self.views.clone()
    }

    /// Most recently published view.
    pub fn latest(&self) -> SessionView {
        self.views.borrow().clone()
    }
}

/// What the runner hands back when it stops.
#[derive(Debug)]
pub struct RunnerExit<S> {
    /// Session in its final state
    pub session: Session,
    /// Score store, including any best score saved during the run
    pub store: S,
}

/// Drives a session in real time.
pub struct SessionRunner<S> {
    session: Session,
    store: S,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    views: watch::Sender<SessionView>,
}

impl<S: BestScoreStore> SessionRunner<S> {
    /// Wraps a session and returns the runner with its first handle.
    ///
    /// The stored best score is read here and folded into the session, so a
    /// lower result never overwrites it.
    pub fn new(mut session: Session, store: S) -> (Self, SessionHandle) {
        match store.load() {
            Ok(Some(best)) => session.record_best_score(best),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load best score"),
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(session.view());

        let runner = Self {
            session,
            store,
            commands: command_rx,
            views: view_tx,
        };
        let handle = SessionHandle {
            commands: command_tx,
            views: view_rx,
        };
        (runner, handle)
    }

    /// Runs until closed, then returns the session and store.
    pub async fn run(mut self) -> RunnerExit<S> {
        info!(scenario = self.session.scenario().name(), "Session runner started");

        let mut next_tick = self.schedule_tick();

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        None | Some(SessionCommand::Close) => break,
                        Some(command) => {
                            if self.apply(command) {
                                next_tick = self.schedule_tick();
                            }
                        }
                    }
                }
                _ = sleep_until(next_tick.unwrap_or_else(Instant::now)), if next_tick.is_some() => {
                    self.tick();
                    next_tick = self.schedule_tick();
                }
            }
            self.publish();
        }

        info!(
            phase = %self.session.phase(),
            elapsed_days = self.session.market().elapsed_days(),
            "Session runner stopped"
        );
        RunnerExit {
            session: self.session,
            store: self.store,
        }
    }

    /// Applies a command; returns true when the tick schedule must be
    /// recomputed.
    fn apply(&mut self, command: SessionCommand) -> bool {
        let result = match command {
            SessionCommand::AdvanceToActive => self.session.advance_to_active().map(|_| true),
            SessionCommand::Trade(shares) => self.session.trade(shares).map(|_| false),
            SessionCommand::Reset => {
                self.session.reset();
                Ok(true)
            }
            SessionCommand::Close => Ok(false),
        };
        result.unwrap_or_else(|e| {
            debug!(?command, error = %e, "Command ignored");
            false
        })
    }

    fn schedule_tick(&self) -> Option<Instant> {
        (self.session.phase() == SessionPhase::Active)
            .then(|| Instant::now() + self.session.tick_interval())
    }

    fn tick(&mut self) {
        let Some(outcome) = self.session.tick() else {
            return;
        };
        if let Some(summary) = outcome.game_over {
            if summary.is_new_best {
                match self.store.save(summary.final_value) {
                    Ok(()) => info!(score = summary.final_value, "New best score saved"),
                    Err(e) => warn!(error = %e, "Failed to save best score"),
                }
            }
        }
    }

    fn publish(&self) {
        self.views.send_replace(self.session.view());
    }
}

impl<S: BestScoreStore + Send + 'static> SessionRunner<S> {
    /// Spawns the runner onto the current tokio runtime.
    pub fn spawn(session: Session, store: S) -> (JoinHandle<RunnerExit<S>>, SessionHandle) {
        let (runner, handle) = Self::new(session, store);
        (tokio::spawn(runner.run()), handle)
    }
}
