//! Object system
//!
//! Damage dice, item instances and the wand/staff catalog.

mod dice;
mod obj;
mod stick;

pub use dice::{DamageDice, Die};
pub use obj::{Item, ItemKind, WeaponKind};
pub use stick::{StickCatalog, StickForm, StickInfo, StickKind};
