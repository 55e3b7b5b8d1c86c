//! Objects in flight

use crate::display::Presentation;
use crate::dungeon::{step_ok, tile, Coord};
use crate::object::Item;
use crate::player::HeroFlags;
use crate::state::Sim;

/// Send `item` flying from the hero in direction `dir`
///
/// The item stops on the first cell it cannot pass: a wall, a door or a
/// monster. `item.pos` is left on that cell. Each cell it crosses shows the
/// item for one frame.
pub fn do_motion(sim: &mut Sim<'_>, item: &mut Item, dir: Coord) {
    let mimics = sim.state.options.throws_affect_mimics;
    item.pos = sim.state.hero.pos;
    if dir == Coord::default() {
        return;
    }

    let mut shown: Option<(Coord, char)> = None;
    loop {
        if let Some((pos, under)) = shown.take() {
            sim.display.draw_char(pos, under);
        }
        item.pos += dir;
        let ch = sim.glyph_at(item.pos, mimics);
        if !step_ok(ch) || ch == tile::DOOR {
            break;
        }
        let hallucinating = sim.state.hero.flags.contains(HeroFlags::HALLUCINATING);
        if sim.can_see(item.pos) && !hallucinating {
            shown = Some((item.pos, sim.display.char_at(item.pos)));
            sim.display.draw_char(item.pos, item.glyph());
            sim.display.pause();
        }
    }
    tracing::trace!(x = item.pos.x, y = item.pos.y, "object came to rest");
}
