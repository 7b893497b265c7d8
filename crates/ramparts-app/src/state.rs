//! Handle shared between the game loop thread and its callers.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use ramparts_core::commands::PlayerCommand;
use ramparts_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Write the current run to a save slot.
    Save { slot: String },
    /// Replace the current run with a saved one.
    Load { slot: String },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Owner-side view of a running game loop.
pub struct GameHandle {
    pub(crate) command_tx: mpsc::Sender<GameLoopCommand>,
    pub(crate) latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub(crate) thread: Option<JoinHandle<()>>,
}

impl GameHandle {
    /// Forward a command. Returns false once the loop has stopped.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.command_tx.send(command).is_ok()
    }

    pub fn send_player(&self, command: PlayerCommand) -> bool {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Most recent snapshot produced by the loop, if any.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("game loop thread panicked");
            }
        }
    }
}
