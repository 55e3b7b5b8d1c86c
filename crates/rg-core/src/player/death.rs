//! How the hero died

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::monster::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// The hero's own bolt came back
    Bolt,
    Monster(Species),
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathCause::Bolt => f.write_str("killed by a bolt"),
            DeathCause::Monster(species) => write!(f, "killed by a {}", species.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DeathCause::Bolt.to_string(), "killed by a bolt");
        assert_eq!(
            DeathCause::Monster(Species::DRAGON).to_string(),
            "killed by a dragon"
        );
    }
}
