//! Magic system
//!
//! Bolts, wands and staves, the magic missile, drain life and the scrolls
//! that work on monsters.

mod bolt;
mod drain;
mod missile;
mod scroll;
mod zap;

pub use bolt::{bolt_glyph, fire_bolt, BoltKind, MagicBolt};
pub use drain::{drain, drainees};
pub use missile::do_motion;
pub use scroll::{aggravate, confuse_touch, create_monster, hold_monsters, vorpalize};
pub use zap::{do_zap, get_monster_in_direction, ZapResult};
