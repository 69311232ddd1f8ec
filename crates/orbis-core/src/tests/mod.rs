//! Crate-level scenario tests.
//!
//! - `determinism.rs`: same seed and inputs give the same game, plus
//!   property checks of the turn gate and inventory bookkeeping
//! - `integration.rs`: full games driven through the public `Game` API
//! - `helpers.rs`: shared setup for the above

mod helpers;
mod integration;

pub use helpers::*;
