//! Core simulation constants
//!
//! Screen geometry, bolt range and the timers shared by several modules.

/// Map dimensions
pub const COLNO: i32 = 80;
pub const ROWNO: i32 = 25;

/// Number of cells a bolt travels before fizzling out
pub const BOLT_LENGTH: usize = 6;

/// Base number of turns a gaze confuses the hero
pub const HUHDURATION: u32 = 20;

/// Squared distance inside which a monster is seen in the dark
pub const LAMPDIST: i32 = 3;

/// Maximum number of monsters a drain-life zap can reach
pub const MAX_DRAINEES: usize = 40;

/// Number of monster species ('A'..='Z')
pub const NUM_SPECIES: usize = 26;

/// Number of wand/staff kinds
pub const MAXSTICKS: usize = 14;

/// Depth past which monsters grow stronger
pub const AMULETLEVEL: i32 = 26;

/// Depth past which monsters are created hasted
pub const HASTE_DEPTH: i32 = 29;

/// Turns before the wandering-monster clock is re-armed
pub const WANDER_TIME: u32 = 70;

/// Default odds (1 in N) that a breathing monster breathes when in line
pub const DRAGONSHOT: u32 = 5;

/// Sleep turns past which frost no longer deepens a freeze
pub const MAX_FREEZE: u32 = 20;

/// Item glyphs a mimic may disguise itself as
pub const DISGUISES: [char; 9] = ['*', '!', '?', '%', ')', ']', '=', '/', ','];
