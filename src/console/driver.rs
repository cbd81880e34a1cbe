//! The session driver: poll, render, read, validate, dispatch.
//!
//! ## Lifecycle
//!
//! `Starting -> Looping -> Terminating -> Terminated`
//!
//! - `Starting`: the engine is started and the driver moves on at once.
//! - `Looping`: while the engine reports the duel ongoing, wait one poll
//!   interval, check again, render a frame, block on one input line, then
//!   either queue a command or print why the line was refused.
//! - `Terminating`: entered on `end`, on end of input, or when the duel is
//!   over. The engine is stopped and the closing message printed; one more
//!   line is read as acknowledgment.
//! - `Terminated`: nothing else is read or written.
//!
//! Every line is checked against a snapshot taken right after it was read.
//! A line read after the duel ended is dropped without being queued.
//! The same snapshot supplies the turn owner and the collections the
//! command's positions are resolved against, so no index outlives the frame
//! it was read from.

use std::io::{self, BufRead, Write};
use std::thread;

use thiserror::Error;
use tracing::{debug, info};

use super::config::ConsoleConfig;
use super::render;
use crate::command::{validate, Directive, ObservedBounds};
use crate::engine::{EngineError, EngineFacade};
use crate::rules::DuelResult;

/// Where the driver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Starting,
    Looping,
    Terminating,
    Terminated,
}

/// Why the session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationCause {
    /// The player typed `end`.
    UserEnded,
    /// The engine stopped reporting the duel as ongoing.
    DuelOver,
    /// The input stream reached its end.
    InputClosed,
}

/// Summary of a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub cause: TerminationCause,
    /// Commands handed to the engine's queue.
    pub commands_submitted: usize,
    /// The engine's verdict, if it reached one.
    pub result: Option<DuelResult>,
}

/// Failures that end a session abnormally.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("engine failed to start: {0}")]
    Engine(#[from] EngineError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Drives one duel from a line-based input to a text output.
pub struct SessionDriver<F, R, W> {
    engine: F,
    input: R,
    output: W,
    config: ConsoleConfig,
    state: DriverState,
    submitted: usize,
}

impl<F: EngineFacade, R: BufRead, W: Write> SessionDriver<F, R, W> {
    #[must_use]
    pub fn new(engine: F, input: R, output: W, config: ConsoleConfig) -> Self {
        Self {
            engine,
            input,
            output,
            config,
            state: DriverState::Starting,
            submitted: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[must_use]
    pub fn engine(&self) -> &F {
        &self.engine
    }

    /// Give back the engine and output.
    pub fn into_parts(self) -> (F, W) {
        (self.engine, self.output)
    }

    /// Run the session to completion.
    pub fn run(&mut self) -> Result<SessionOutcome, DriverError> {
        self.state = DriverState::Starting;
        self.engine.start()?;
        info!("session started");

        self.state = DriverState::Looping;
        let cause = self.run_loop()?;

        self.state = DriverState::Terminating;
        self.engine.stop();
        let last = self.engine.snapshot();
        render::closing(&mut self.output, &last)?;
        self.output.flush()?;
        if cause != TerminationCause::InputClosed {
            self.read_line()?;
        }

        self.state = DriverState::Terminated;
        info!(?cause, commands = self.submitted, "session ended");
        Ok(SessionOutcome {
            cause,
            commands_submitted: self.submitted,
            result: last.result,
        })
    }

    fn run_loop(&mut self) -> Result<TerminationCause, DriverError> {
        while self.engine.is_ongoing() {
            if !self.config.poll_interval.is_zero() {
                thread::sleep(self.config.poll_interval);
            }
            if !self.engine.is_ongoing() {
                break;
            }

            render::frame(&mut self.output, &self.engine.snapshot())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(TerminationCause::InputClosed);
            };
            if self.config.clear_screen {
                render::clear(&mut self.output)?;
            }

            if self.dispatch(&line)? {
                return Ok(TerminationCause::UserEnded);
            }
        }
        Ok(TerminationCause::DuelOver)
    }

    /// Handle one input line. Returns `true` when the player asked to end.
    fn dispatch(&mut self, line: &str) -> Result<bool, DriverError> {
        let current = self.engine.snapshot();
        if !current.ongoing {
            debug!("duel ended while reading, line dropped");
            return Ok(false);
        }
        let owner = current.turn_owner();

        let directive = match validate(line, ObservedBounds::of(&current)) {
            Ok(directive) => directive,
            Err(rejection) => {
                debug!(%rejection, "line rejected");
                render::rejection(&mut self.output, &rejection)?;
                return Ok(false);
            }
        };

        match directive {
            Directive::End => return Ok(true),
            Directive::Help => render::help(&mut self.output)?,
            Directive::ShowHand => render::collection(&mut self.output, "Hand", &owner.hand)?,
            Directive::ShowGrave => render::collection(&mut self.output, "Grave", &owner.grave)?,
            Directive::Submit(request) => {
                match request.resolve(owner.id, &owner.hand, &current.field) {
                    Ok(command) => {
                        debug!(%command, "command queued");
                        self.engine.enqueue_command(command);
                        self.submitted += 1;
                    }
                    Err(rejection) => render::rejection(&mut self.output, &rejection)?,
                }
            }
        }
        Ok(false)
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::HeroImprint;
    use crate::command::Command;
    use crate::core::player::{Player, PlayerId, PlayerMap};
    use crate::core::resources::ResourcePool;
    use crate::core::state::{DuelSnapshot, DuelState, TurnData};
    use crate::zones::Field;
    use std::cell::{Cell, RefCell};
    use std::io::Cursor;
    use std::time::Duration;

    /// Facade that never changes state and records what it is sent.
    struct Idle {
        state: DuelState,
        queued: RefCell<Vec<Command>>,
        stopped: Cell<bool>,
    }

    impl Idle {
        fn new() -> Self {
            let hero = HeroImprint::new("Knight", 20);
            let players = PlayerMap::new(2, |id| {
                Player::new(id, format!("user{}", id.index()), &hero, ResourcePool::default())
            });
            Self {
                state: DuelState::new(players, 10, PlayerId::new(0)),
                queued: RefCell::new(Vec::new()),
                stopped: Cell::new(false),
            }
        }
    }

    impl EngineFacade for Idle {
        fn start(&mut self) -> Result<(), EngineError> {
            self.state.ongoing = true;
            Ok(())
        }
        fn is_ongoing(&self) -> bool {
            self.state.ongoing && !self.stopped.get()
        }
        fn current_turn(&self) -> TurnData {
            self.state.turn
        }
        fn opposing_player(&self, of: PlayerId) -> PlayerId {
            self.state.opposing_player(of)
        }
        fn player(&self, id: PlayerId) -> Player {
            self.state.players[id].clone()
        }
        fn field(&self) -> Field {
            self.state.field.clone()
        }
        fn snapshot(&self) -> DuelSnapshot {
            let mut snapshot = self.state.snapshot();
            snapshot.ongoing = self.is_ongoing();
            snapshot
        }
        fn enqueue_command(&self, command: Command) {
            self.queued.borrow_mut().push(command);
        }
        fn stop(&mut self) {
            self.stopped.set(true);
        }
    }

    fn driver(input: &str) -> SessionDriver<Idle, Cursor<Vec<u8>>, Vec<u8>> {
        let config = ConsoleConfig::default()
            .with_poll_interval(Duration::ZERO)
            .with_clear_screen(false);
        SessionDriver::new(Idle::new(), Cursor::new(input.as_bytes().to_vec()), Vec::new(), config)
    }

    #[test]
    fn test_end_terminates() {
        let mut driver = driver("end\n");
        let outcome = driver.run().unwrap();

        assert_eq!(outcome.cause, TerminationCause::UserEnded);
        assert_eq!(outcome.commands_submitted, 0);
        assert_eq!(driver.state(), DriverState::Terminated);
        assert!(driver.engine().stopped.get());
    }

    #[test]
    fn test_eof_terminates() {
        let mut driver = driver("charge\n");
        let outcome = driver.run().unwrap();

        assert_eq!(outcome.cause, TerminationCause::InputClosed);
        assert_eq!(outcome.commands_submitted, 1);
    }

    #[test]
    fn test_local_verbs_do_not_submit() {
        let mut driver = driver("hand\ngrave\nhelp\nend\n");
        driver.run().unwrap();

        let (engine, output) = driver.into_parts();
        let text = String::from_utf8(output).unwrap();
        assert!(engine.queued.borrow().is_empty());
        assert!(text.contains("---Hand-------"));
        assert!(text.contains("---Grave-------"));
        assert!(text.contains(crate::command::HELP_LINE));
        assert!(text.ends_with("Game Over - Press Enter to Terminate\n"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut driver = driver("levelup\r\nend\r\n");
        let outcome = driver.run().unwrap();

        assert_eq!(outcome.cause, TerminationCause::UserEnded);
        assert_eq!(outcome.commands_submitted, 1);
    }
}
