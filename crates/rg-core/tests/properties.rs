//! Property tests for dice, drain life and bolt flight

use proptest::prelude::*;
use rg_core::dungeon::dir;
use rg_core::magic::{drain, fire_bolt, BoltKind, MagicBolt};
use rg_core::monster::{new_monster, Species};
use rg_core::object::DamageDice;
use rg_core::{Coord, GameRng, Grid, Sim, SimOptions, SimulationState, Transcript, BOLT_LENGTH};

const BOLT_KINDS: [BoltKind; 4] = [BoltKind::Lightning, BoltKind::Flame, BoltKind::Ice, BoltKind::Frost];

fn room_level(seed: u32) -> (Grid, SimulationState) {
    let mut grid = Grid::new(40, 20);
    let room = grid.add_room(Coord::new(1, 1), Coord::new(20, 12), false);
    let mut state = SimulationState::new(seed, SimOptions::default());
    state.hero.pos = Coord::new(10, 8);
    state.hero.region = Some(room);
    (grid, state)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_dice_stay_in_range(count in 1u32..10, sides in 1u32..20, seed in any::<u32>()) {
        let dice = DamageDice::single(count, sides);
        let mut rng = GameRng::new(seed);
        for _ in 0..20 {
            let total = dice.roll(&mut rng);
            prop_assert!(total >= count && total <= count * sides);
        }
    }

    #[test]
    fn prop_drain_splits_evenly(hp in 2i32..500, count in 1i32..10, seed in any::<u32>()) {
        let (mut grid, mut state) = room_level(seed);
        state.hero.hp = hp;
        let mut display = Transcript::new();
        let mut sim = Sim::new(&mut state, &mut grid, &mut display);
        let ids: Vec<_> = (0..count)
            .map(|i| {
                let id = new_monster(&mut sim, Species::DRAGON, Coord::new(3 + i, 3));
                sim.state.monsters.get_mut(id).unwrap().hp = 1000;
                id
            })
            .collect();

        let per = drain(&mut sim).unwrap().unwrap();

        let left = hp / 2;
        prop_assert_eq!(sim.state.hero.hp, left);
        prop_assert_eq!(per, left / count + 1);
        prop_assert!(per * count <= left + count);
        for id in ids {
            prop_assert_eq!(sim.state.monsters.get(id).unwrap().hp, 1000 - per);
        }
    }

    #[test]
    fn prop_bolts_always_fade(
        x in 2i32..20,
        y in 2i32..12,
        heading in 0usize..8,
        kind in 0usize..4,
        from_player in any::<bool>(),
        seed in any::<u32>(),
    ) {
        let (mut grid, mut state) = room_level(seed);
        state.hero.hp = 1000;
        let mut display = Transcript::new();
        let mut sim = Sim::new(&mut state, &mut grid, &mut display);
        let bolt = MagicBolt::new(BOLT_KINDS[kind], from_player);

        let result = fire_bolt(&mut sim, Coord::new(x, y), dir::ALL[heading], bolt);

        prop_assert!(result.is_ok());
        prop_assert!(display.pauses() <= 2 * BOLT_LENGTH);
        prop_assert!(!display.in_standout());
    }
}
