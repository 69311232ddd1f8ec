//! Command routing.
//!
//! The [`CommandBus`] maps command names to handlers. Each name is bound at
//! most once; dispatching a command nobody handles is an error.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use orbis_command::bus::{CommandBus, CommandHandler};
//! use orbis_command::command::{Command, SourceId};
//! use orbis_command::error::CommandError;
//!
//! struct Ignore;
//!
//! impl CommandHandler for Ignore {
//!     fn handle(&self, _command: &Command) -> Result<(), CommandError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut bus = CommandBus::new();
//! bus.register_handler("remove-player", Arc::new(Ignore)).unwrap();
//! assert!(bus.register_handler("remove-player", Arc::new(Ignore)).is_err());
//!
//! let leave = Command::RemovePlayer {
//!     source_id: SourceId::new(1),
//!     player_name: "alice".into(),
//! };
//! assert!(bus.dispatch(&leave).is_ok());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use orbis_core::Game;
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::CommandError;
use crate::handler::GameCommandHandler;
use crate::message::MessageBus;

/// Executes commands routed to it by name.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CommandHandler: Send + Sync {
    /// Handles one command.
    ///
    /// # Errors
    ///
    /// Returns the reason the command was rejected.
    fn handle(&self, command: &Command) -> Result<(), CommandError>;
}

/// Name to handler registry.
#[derive(Default)]
pub struct CommandBus {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a bus routing every command to one [`GameCommandHandler`].
    #[must_use]
    pub fn with_game_handler(game: Arc<Mutex<Game>>, messages: Arc<dyn MessageBus>) -> Self {
        let handler: Arc<dyn CommandHandler> = Arc::new(GameCommandHandler::new(game, messages));
        let handlers = Command::NAMES
            .iter()
            .map(|name| ((*name).to_owned(), Arc::clone(&handler)))
            .collect();
        Self { handlers }
    }

    /// Binds `handler` to `command_name`.
    ///
    /// # Arguments
    ///
    /// * `command_name` - Name as returned by [`Command::name`]
    /// * `handler` - Handler shared across registrations
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::HandlerRegistration`] if the name is already
    /// bound. The existing binding is kept.
    pub fn register_handler(
        &mut self,
        command_name: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<(), CommandError> {
        let command_name = command_name.into();
        if self.handlers.contains_key(&command_name) {
            return Err(CommandError::HandlerRegistration(command_name));
        }
        debug!(command = %command_name, "handler registered");
        self.handlers.insert(command_name, handler);
        Ok(())
    }

    /// Routes `command` to its handler.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::HandlerNotFound`] if no handler is bound to
    /// the command's name, or the handler's own error.
    pub fn dispatch(&self, command: &Command) -> Result<(), CommandError> {
        let Some(handler) = self.handlers.get(command.name()) else {
            warn!(command = command.name(), source = %command.source_id(), "no handler bound");
            return Err(CommandError::HandlerNotFound(command.name().to_owned()));
        };
        handler.handle(command)
    }

    /// Returns `true` if a handler is bound to `command_name`.
    #[must_use]
    pub fn has_handler(&self, command_name: &str) -> bool {
        self.handlers.contains_key(command_name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CommandBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("CommandBus")
            .field("handlers", &names)
            .finish()
    }
}
