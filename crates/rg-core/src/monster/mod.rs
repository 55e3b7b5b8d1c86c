//! Monster system
//!
//! Contains species templates (permonst), instances (monst), creation,
//! AI and slime division.

pub mod ai;
mod lifecycle;
mod makemon;
mod monst;
mod permonst;
mod slime;

pub use ai::{chase_step, run_monsters, wake_monster, wake_nearby, AiAction};
pub use lifecycle::{move_monster, place_monster, redraw_monster, remove_monster};
pub use makemon::{new_monster, random_monster, remove_species, wanderer_event, SpeciesTable};
pub use monst::{AiState, Destination, Monster, MonsterId, MonsterTable};
pub use permonst::{MonsterFlags, Species, SpeciesTemplate};
pub use slime::{plop_monster, slime_split};
