//! Async session actor.
//!
//! A [`GameSession`] owns one [`GameController`] inside a tokio task. The
//! presentation layer talks to it only through a [`SessionHandle`] and reads
//! [`GameEvent`]s from a channel, so all game state stays on one task.
//!
//! When the computer has the turn the actor picks its square, waits the
//! configured thinking delay, then places the mark. Commands that arrive
//! during the wait are drained: human moves are rejected by the controller
//! and restarts are dropped. The wait is never cut short.

use crate::config::{ConfigError, GameConfig};
use crate::games::tictactoe::{GameController, GameEvent, Phase};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Requests accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// A click on a board cell; restarts a finished game.
    Click(usize),
    /// A human move at the given index.
    HumanMove(usize),
    /// Start over.
    Restart,
    /// Stop the actor and hand back the controller.
    Shutdown,
}

/// Errors talking to a session task.
#[derive(Debug, derive_more::Display)]
pub enum SessionError {
    /// The task is no longer receiving commands.
    #[display("Session task has stopped")]
    Closed,
    /// The task panicked or was cancelled.
    #[display("Session task failed: {}", _0)]
    Join(tokio::task::JoinError),
    /// The session was refused an invalid configuration.
    #[display("Session not started: {}", _0)]
    Config(ConfigError),
}

impl std::error::Error for SessionError {}

/// Client side of a running session.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    task: JoinHandle<GameController>,
}

impl SessionHandle {
    /// Sends a raw command.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }

    /// Clicks a cell.
    pub fn click(&self, index: usize) -> Result<(), SessionError> {
        self.send(SessionCommand::Click(index))
    }

    /// Plays a human move.
    pub fn human_move(&self, index: usize) -> Result<(), SessionError> {
        self.send(SessionCommand::HumanMove(index))
    }

    /// Restarts the game.
    pub fn restart(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Restart)
    }

    /// Stops the session after queued commands and returns its controller.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<GameController, SessionError> {
        // The task may already have stopped on its own; joining still works.
        let _ = self.commands.send(SessionCommand::Shutdown);
        self.task.await.map_err(SessionError::Join)
    }
}

/// Actor that serializes all access to one controller.
pub struct GameSession {
    controller: GameController,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    thinking_delay: Duration,
}

impl GameSession {
    /// Spawns a session on the current tokio runtime.
    ///
    /// The returned receiver yields every controller event, starting with the
    /// initial status.
    ///
    /// # Errors
    ///
    /// `SessionError::Config` when `config` fails validation.
    #[instrument(skip(config))]
    pub fn spawn(
        config: GameConfig,
    ) -> Result<(SessionHandle, mpsc::UnboundedReceiver<GameEvent>), SessionError> {
        config.validate().map_err(SessionError::Config)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let thinking_delay = config.thinking_delay();
        let mut controller = GameController::new(config);
        controller.subscribe(move |event| {
            if event_tx.send(*event).is_err() {
                debug!("Event receiver dropped");
            }
        });

        let session = GameSession {
            controller,
            commands: command_rx,
            thinking_delay,
        };
        let task = tokio::spawn(session.run());

        Ok((
            SessionHandle {
                commands: command_tx,
                task,
            },
            event_rx,
        ))
    }

    async fn run(mut self) -> GameController {
        info!(delay = ?self.thinking_delay, "Session started");
        self.controller.announce_status();

        loop {
            if self.controller.phase() == Phase::ComputerThinking {
                if self.computer_turn().await.is_break() {
                    break;
                }
                continue;
            }

            match self.commands.recv().await {
                None | Some(SessionCommand::Shutdown) => break,
                Some(command) => self.handle(command),
            }
        }

        info!(round = self.controller.round(), "Session stopped");
        self.controller
    }

    fn handle(&mut self, command: SessionCommand) {
        debug!(?command, "Handling command");
        let result = match command {
            SessionCommand::Click(index) => self.controller.click(index),
            SessionCommand::HumanMove(index) => self.controller.apply_human_move(index),
            SessionCommand::Restart => {
                self.controller.restart();
                Ok(true)
            }
            SessionCommand::Shutdown => Ok(false),
        };
        if let Err(err) = result {
            error!(error = %err, ?command, "Command failed");
        }
    }

    async fn computer_turn(&mut self) -> ControlFlow<()> {
        let Some(index) = self.controller.choose_computer_move() else {
            error!("Computer has the turn but no square is free");
            return ControlFlow::Break(());
        };
        debug!(index, "Computer chose a square, thinking");

        let mut stopping = false;
        let delay = tokio::time::sleep(self.thinking_delay);
        tokio::pin!(delay);

        loop {
            tokio::select! {
                _ = &mut delay => break,
                command = self.commands.recv(), if !stopping => match command {
                    None | Some(SessionCommand::Shutdown) => stopping = true,
                    Some(SessionCommand::Restart) => {
                        warn!("Restart ignored while the computer is thinking");
                    }
                    Some(command) => self.handle(command),
                },
            }
        }

        if let Err(err) = self.controller.apply_computer_move(index) {
            error!(error = %err, index, "Computer move failed");
            return ControlFlow::Break(());
        }

        if stopping {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
