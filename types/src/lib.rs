//! Common types used throughout burrow.
//!
//! Defines the board/player/round/vesting data model, admin-set configuration,
//! outward events, and the error taxonomy shared by the execution layer and
//! clients. All persistent types carry canonical binary encodings via
//! `commonware-codec`.

mod api;
mod board;
mod codec;
mod config;
mod constants;
mod epoch;
mod error;
mod event;
mod player;
mod round;
mod token;
mod vesting;

pub use api::*;
pub use board::*;
pub use codec::*;
pub use config::*;
pub use constants::*;
pub use epoch::*;
pub use error::*;
pub use event::*;
pub use player::*;
pub use round::*;
pub use token::*;
pub use vesting::*;

/// Player address (account public key).
pub type Address = commonware_cryptography::ed25519::PublicKey;

/// Round identifier, unique per transaction.
pub type RoundId = commonware_cryptography::sha256::Digest;
