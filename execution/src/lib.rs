//! Burrow execution layer.
//!
//! Deterministic round resolution and reward vesting for the dice-and-board
//! race. The primary entrypoint is [`layer::Engine`], which owns the game
//! state and executes one action at a time against host-supplied
//! collaborators.
//!
//! ## Determinism requirements
//! - No wall-clock reads inside execution; time arrives via the action
//!   context.
//! - All randomness derives from the per-height seed mixed with the round
//!   identifier; nothing else may influence an outcome.
//! - State lives in ordered collections so iteration order is stable.

pub mod board;
pub mod entropy;
pub mod epoch;
pub mod layer;
pub mod quota;
pub mod vesting;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use layer::{ActionContext, Engine, TokenLedger};
