//! # Orbis Command
//!
//! Command layer for the Orbis rules engine.
//!
//! Inbound [`Command`]s are routed by name through a [`CommandBus`] to a
//! [`CommandHandler`]. The [`GameCommandHandler`] applies each command to a
//! shared [`Game`](orbis_core::Game) under a lock and reports the outcome
//! through a [`MessageBus`]: successes go to every connection, failures only
//! to the sender.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use orbis_command::{Command, CommandBus, Delivery, Outbox, SourceId};
//! use orbis_core::{ClassCatalog, Game, GameConfig, PlayerTemplate, RingBoard, Stats, WeaponItem};
//!
//! let catalog = ClassCatalog::new().with_class(
//!     "warrior",
//!     PlayerTemplate::new(Stats::new(100, 1, 4, 0), WeaponItem::new("sword", 1, 6)),
//! );
//! let game = Game::from_config(
//!     &GameConfig::default().with_seed(3),
//!     Arc::new(RingBoard::uniform(2, 10)?),
//!     Box::new(catalog),
//! )?;
//!
//! let outbox = Arc::new(Outbox::new());
//! let bus = CommandBus::with_game_handler(Arc::new(Mutex::new(game)), outbox.clone());
//!
//! bus.dispatch(&Command::CreatePlayer {
//!     source_id: SourceId::new(1),
//!     player_name: "alice".into(),
//!     player_class: "warrior".into(),
//! })?;
//!
//! let deliveries = outbox.drain();
//! assert!(matches!(&deliveries[..], [Delivery::Broadcast(m)] if m.name() == "player-added"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod command;
pub mod error;
pub mod handler;
pub mod message;

pub use bus::{CommandBus, CommandHandler};
pub use command::{Command, SourceId};
pub use error::CommandError;
pub use handler::GameCommandHandler;
pub use message::{Delivery, Message, MessageBuilder, MessageBus, Outbox};

#[cfg(any(test, feature = "testing"))]
pub use bus::MockCommandHandler;
#[cfg(any(test, feature = "testing"))]
pub use message::MockMessageBus;
