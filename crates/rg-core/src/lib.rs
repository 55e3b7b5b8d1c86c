//! rg-core: turn-based simulation core for a dungeon crawler
//!
//! This crate decides what monsters do each turn, how combat and magic
//! resolve and how bolts fly and bounce. It owns no screen, no input and
//! no level generation: the level is read through [`dungeon::LevelMap`]
//! and everything visible goes out through [`display::Presentation`].

pub mod combat;
pub mod config;
pub mod display;
pub mod dungeon;
pub mod error;
pub mod magic;
pub mod monster;
pub mod object;
pub mod player;
pub mod state;
pub mod turn;

mod consts;
mod rng;

pub use config::{OptionsError, SimOptions, StrikingChargePolicy};
pub use consts::*;
pub use display::{Color, Presentation, Transcript};
pub use dungeon::{Coord, Grid, LevelMap, Region};
pub use error::{CoreError, Result};
pub use rng::GameRng;
pub use state::{Sim, SimulationState};
pub use turn::{run_turn, TurnOutcome};
