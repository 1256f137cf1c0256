#![cfg_attr(not(feature = "std"), no_std)]

mod board;
mod common;
mod config;
mod engine;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod ship;
#[cfg(feature = "std")]
pub mod snapshot;

pub use board::*;
pub use common::*;
pub use config::*;
pub use engine::*;
pub use grid::{BitGrid, GridError};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use ship::*;
#[cfg(feature = "std")]
pub use snapshot::GameSnapshot;
