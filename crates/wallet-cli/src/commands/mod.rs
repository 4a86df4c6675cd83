//! Command implementations
//!
//! One file per command area; `cli.rs` holds the argument definitions.

mod chat;
mod core;
mod export;
mod goal;
mod ledger;
mod reports;
mod tracker;

pub use chat::*;
pub use core::*;
pub use export::*;
pub use goal::*;
pub use ledger::*;
pub use reports::*;
pub use tracker::*;
