//! Monthly time-played and win/loss/draw summaries from a player's chess.com
//! game archives.

#[macro_use]
mod verbose;

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pgn;
pub mod remote;
pub mod report;

pub use verbose::set as set_verbosity;
pub use verbose::enabled as verbose_enabled;
