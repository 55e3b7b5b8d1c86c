//! Damage dice expressions ("1d8", "1d2/1d5/1d5")

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rng::GameRng;

/// One `NdS` term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub count: u32,
    pub sides: u32,
}

impl Die {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Smallest and largest total this term can roll
    pub const fn range(self) -> (u32, u32) {
        (self.count, self.count * self.sides)
    }
}

/// A slash-separated list of attacks, each rolled on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDice {
    parts: Vec<Die>,
}

impl DamageDice {
    pub fn single(count: u32, sides: u32) -> Self {
        Self {
            parts: vec![Die::new(count, sides)],
        }
    }

    /// "0d0": no damage at all
    pub fn none() -> Self {
        Self::single(0, 0)
    }

    pub fn parts(&self) -> &[Die] {
        &self.parts
    }

    /// Roll every term and add them up
    pub fn roll(&self, rng: &mut GameRng) -> u32 {
        self.parts.iter().map(|d| rng.roll(d.count, d.sides)).sum()
    }
}

impl Default for DamageDice {
    fn default() -> Self {
        Self::none()
    }
}

impl FromStr for DamageDice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::BadDice(s.to_string());
        let parts = s
            .split('/')
            .map(|term| {
                let (count, sides) = term.trim().split_once('d').ok_or_else(bad)?;
                Ok(Die::new(
                    count.parse().map_err(|_| bad())?,
                    sides.parse().map_err(|_| bad())?,
                ))
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(Self { parts })
    }
}

impl fmt::Display for DamageDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}d{}", die.count, die.sides)?;
        }
        Ok(())
    }
}
