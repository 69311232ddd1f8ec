//! Command layer errors.

use orbis_core::GameError;
use thiserror::Error;

/// Error returned by the [`CommandBus`](crate::bus::CommandBus) and command
/// handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A handler is already bound to this command name.
    #[error("a handler is already registered for command `{0}`")]
    HandlerRegistration(String),

    /// No handler is bound to this command name.
    #[error("no handler registered for command `{0}`")]
    HandlerNotFound(String),

    /// The game rejected the command.
    #[error(transparent)]
    Game(#[from] GameError),
}
