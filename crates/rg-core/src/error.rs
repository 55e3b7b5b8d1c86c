//! Error types for the simulation core

use thiserror::Error;

use crate::dungeon::Coord;
use crate::monster::MonsterId;

/// Internal-consistency failures.
///
/// These abort the requested operation and are caught at the turn boundary;
/// expected outcomes such as a missed zap never surface as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("no monster at ({}, {})", .0.x, .0.y)]
    MonsterNotFound(Coord),

    #[error("monster {0:?} is not on the level")]
    UnknownMonster(MonsterId),

    #[error("'{0}' is not a monster species")]
    UnknownSpecies(char),

    #[error("malformed damage dice: {0}")]
    BadDice(String),
}

pub type Result<T> = core::result::Result<T, CoreError>;
