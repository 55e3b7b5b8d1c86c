//! Player system
//!
//! Contains the Hero struct, rings, strength tables and death causes.

mod death;
mod you;

pub use death::DeathCause;
pub use you::{add_dam, level_for_exp, str_plus, Hero, HeroFlags, Ring, RingKind};
