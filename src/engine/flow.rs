//! Threaded duel flow.
//!
//! `DuelFlow` runs a `RulesEngine` on its own `duel-engine` thread. The
//! state lives behind an `Arc<RwLock<_>>`: the engine thread takes the write
//! lock once per command, readers take the read lock just long enough to
//! copy a `DuelSnapshot`.
//!
//! Commands travel through an unbounded channel, so enqueueing never blocks
//! and the engine sees them in submission order. Commands queued before
//! `start` are buffered and applied once the thread is running.
//!
//! ## Stopping
//!
//! `stop` raises a cancellation flag and closes the queue. The engine thread
//! checks the flag between commands, so it finishes the command in hand
//! (if any) and exits within one tick. A stopped duel ends with
//! `ongoing == false` and no result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::facade::{EngineError, EngineFacade};
use crate::command::Command;
use crate::core::player::{Player, PlayerId};
use crate::core::state::{DuelSnapshot, DuelState, TurnData};
use crate::rules::RulesEngine;
use crate::zones::Field;

/// How long the engine thread waits for a command before rechecking the
/// cancellation flag.
pub const DEFAULT_TICK: Duration = Duration::from_millis(20);

/// A duel driven by a rules engine on a background thread.
pub struct DuelFlow<R> {
    state: Arc<RwLock<DuelState>>,
    rules: Option<R>,
    sender: Option<Sender<Command>>,
    receiver: Option<Receiver<Command>>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    tick: Duration,
}

impl<R: RulesEngine + Send + 'static> DuelFlow<R> {
    /// Wrap a prepared state. Nothing runs until `start`.
    #[must_use]
    pub fn new(state: DuelState, rules: R) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: Arc::new(RwLock::new(state)),
            rules: Some(rules),
            sender: Some(sender),
            receiver: Some(receiver),
            cancel: Arc::new(AtomicBool::new(false)),
            handle: None,
            tick: DEFAULT_TICK,
        }
    }

    /// Set the engine thread's cancellation check interval.
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    fn spawn(&mut self) -> Result<(), EngineError> {
        let (Some(rules), Some(receiver)) = (self.rules.take(), self.receiver.take()) else {
            return Err(EngineError::AlreadyStarted);
        };

        write_state(&self.state).ongoing = true;

        let state = Arc::clone(&self.state);
        let cancel = Arc::clone(&self.cancel);
        let tick = self.tick;
        let spawned = thread::Builder::new()
            .name("duel-engine".into())
            .spawn(move || run_engine(rules, &state, &receiver, &cancel, tick));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                info!("engine started");
                Ok(())
            }
            Err(e) => {
                write_state(&self.state).ongoing = false;
                Err(EngineError::Spawn(e))
            }
        }
    }
}

impl<R> DuelFlow<R> {
    fn read(&self) -> RwLockReadGuard<'_, DuelState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn shutdown(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        self.sender = None;

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("engine thread panicked");
            }
            info!("engine stopped");
        }
        write_state(&self.state).ongoing = false;
    }
}

impl<R: RulesEngine + Send + 'static> EngineFacade for DuelFlow<R> {
    fn start(&mut self) -> Result<(), EngineError> {
        self.spawn()
    }

    fn is_ongoing(&self) -> bool {
        self.read().ongoing
    }

    fn current_turn(&self) -> TurnData {
        self.read().turn
    }

    fn opposing_player(&self, of: PlayerId) -> PlayerId {
        self.read().opposing_player(of)
    }

    fn player(&self, id: PlayerId) -> Player {
        self.read().players[id].clone()
    }

    fn field(&self) -> Field {
        self.read().field.clone()
    }

    fn snapshot(&self) -> DuelSnapshot {
        self.read().snapshot()
    }

    fn enqueue_command(&self, command: Command) {
        match &self.sender {
            Some(sender) => {
                if let Err(mpsc::SendError(command)) = sender.send(command) {
                    debug!(%command, "engine queue closed, command dropped");
                }
            }
            None => debug!(%command, "engine stopped, command dropped"),
        }
    }

    fn stop(&mut self) {
        self.shutdown();
    }
}

impl<R> Drop for DuelFlow<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn write_state(state: &RwLock<DuelState>) -> RwLockWriteGuard<'_, DuelState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Engine thread body.
fn run_engine<R: RulesEngine>(
    mut rules: R,
    state: &RwLock<DuelState>,
    commands: &Receiver<Command>,
    cancel: &AtomicBool,
    tick: Duration,
) {
    {
        let mut guard = write_state(state);
        rules.start_duel(&mut guard);
        if let Some(result) = rules.is_terminal(&guard) {
            info!(?result, "duel over before the first command");
            guard.finish(Some(result));
            return;
        }
    }

    while !cancel.load(Ordering::SeqCst) {
        let command = match commands.recv_timeout(tick) {
            Ok(command) => command,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let mut guard = write_state(state);
        if !guard.ongoing {
            break;
        }
        match rules.apply_command(&mut guard, &command) {
            Ok(()) => debug!(%command, "command applied"),
            Err(violation) => warn!(%command, %violation, "command refused"),
        }
        if let Some(result) = rules.is_terminal(&guard) {
            info!(?result, turn = guard.turn.number, "duel over");
            guard.finish(Some(result));
            return;
        }
    }

    write_state(state).finish(None);
}
