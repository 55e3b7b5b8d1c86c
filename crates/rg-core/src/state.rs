//! Simulation state and the per-call context
//!
//! [`SimulationState`] owns everything the core mutates between turns.
//! [`Sim`] bundles it with the embedder's level and presentation for the
//! duration of one operation.

use serde::{Deserialize, Serialize};

use crate::config::SimOptions;
use crate::consts::LAMPDIST;
use crate::display::Presentation;
use crate::dungeon::{Coord, LevelMap};
use crate::monster::{MonsterFlags, MonsterId, MonsterTable, SpeciesTable};
use crate::object::{Item, StickCatalog};
use crate::player::{DeathCause, Hero, HeroFlags};
use crate::rng::GameRng;

/// Everything the simulation owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub rng: GameRng,
    pub hero: Hero,
    pub monsters: MonsterTable,
    pub species: SpeciesTable,
    pub sticks: StickCatalog,
    pub options: SimOptions,
    /// Current dungeon level, 1-based
    pub depth: i32,
    /// Items dropped on the floor by dying monsters
    pub floor_items: Vec<Item>,
    pub death: Option<DeathCause>,
    /// Turns elapsed
    pub turns: u64,
    /// Turns until the wandering-monster clock starts rolling again
    pub wander_delay: u32,
}

impl SimulationState {
    pub fn new(seed: u32, options: SimOptions) -> Self {
        let mut rng = GameRng::new(seed);
        let sticks = StickCatalog::new(&mut rng);
        Self {
            rng,
            hero: Hero::default(),
            monsters: MonsterTable::new(),
            species: SpeciesTable::default(),
            sticks,
            options,
            depth: 1,
            floor_items: Vec::new(),
            death: None,
            turns: 0,
            wander_delay: 0,
        }
    }

    pub fn is_hero_dead(&self) -> bool {
        self.death.is_some()
    }

    /// Record the hero's death; the first cause sticks
    pub fn kill_hero(&mut self, cause: DeathCause) {
        if self.death.is_none() {
            tracing::info!(%cause, "hero died");
            self.death = Some(cause);
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(42, SimOptions::default())
    }
}

/// Mutable access to the state, level and screen for one operation
pub struct Sim<'a> {
    pub state: &'a mut SimulationState,
    pub level: &'a mut dyn LevelMap,
    pub display: &'a mut dyn Presentation,
}

impl<'a> Sim<'a> {
    pub fn new(
        state: &'a mut SimulationState,
        level: &'a mut dyn LevelMap,
        display: &'a mut dyn Presentation,
    ) -> Self {
        Self {
            state,
            level,
            display,
        }
    }

    pub fn msg(&mut self, text: impl AsRef<str>) {
        self.display.message(text.as_ref());
    }

    /// The monster's glyph if one stands at `pos`, otherwise the level tile
    ///
    /// A disguised monster shows its true letter when `mimic_as_monster`
    /// is set and its disguise otherwise.
    pub fn glyph_at(&self, pos: Coord, mimic_as_monster: bool) -> char {
        let monster = self
            .state
            .monsters
            .at(pos, true)
            .and_then(|id| self.state.monsters.get(id));
        match monster {
            Some(m) if mimic_as_monster => m.species.letter(),
            Some(m) => m.disguise,
            None => self.level.tile_at(pos),
        }
    }

    pub fn monster_at(&self, pos: Coord) -> Option<MonsterId> {
        self.state.monsters.at(pos, true)
    }

    /// Can the hero see a monster standing at `pos`?
    pub fn can_see(&self, pos: Coord) -> bool {
        let hero = &self.state.hero;
        if hero.is_blind() {
            return false;
        }
        if pos.distance(hero.pos) < LAMPDIST {
            return true;
        }
        let here = self.level.region_at(pos);
        here.is_some()
            && here == hero.region
            && here
                .and_then(|r| self.level.room(r))
                .is_some_and(|room| !room.is_dark())
    }

    /// Can the hero see this particular monster?
    pub fn can_see_monster(&self, id: MonsterId) -> bool {
        let Some(monster) = self.state.monsters.get(id) else {
            return false;
        };
        if monster.has(MonsterFlags::INVISIBLE)
            && !self.state.hero.flags.contains(HeroFlags::SEE_INVISIBLE)
        {
            return false;
        }
        self.can_see(monster.pos)
    }
}
