//! Putting monsters on, moving them across, and taking them off the level

use super::{Monster, MonsterId};
use crate::dungeon::Coord;
use crate::error::{CoreError, Result};
use crate::state::Sim;

/// Add a monster to the table and draw it if the hero can see it
pub fn place_monster(sim: &mut Sim<'_>, mut monster: Monster) -> MonsterId {
    let pos = monster.pos;
    monster.tile_beneath = Some(sim.level.tile_at(pos));
    monster.region = sim.level.region_at(pos);
    let id = sim.state.monsters.insert(monster);
    redraw_monster(sim, id);
    id
}

/// Draw a monster's current glyph if visible
pub fn redraw_monster(sim: &mut Sim<'_>, id: MonsterId) {
    if sim.can_see_monster(id) {
        if let Some(m) = sim.state.monsters.get(id) {
            let (pos, glyph) = (m.pos, m.disguise);
            sim.display.draw_char(pos, glyph);
        }
    }
}

/// Put back what the screen showed under a monster before it arrived
fn restore_beneath(sim: &mut Sim<'_>, id: MonsterId) {
    let Some(m) = sim.state.monsters.get(id) else {
        return;
    };
    let pos = m.pos;
    let under = m.tile_beneath.unwrap_or_else(|| sim.level.tile_at(pos));
    // another monster on the same cell keeps it covered
    let covered = sim.state.monsters.iter().any(|o| o.id != id && o.pos == pos);
    if !covered && sim.display.char_at(pos) != under && sim.can_see(pos) {
        sim.display.draw_char(pos, under);
    }
}

/// Move a monster, restoring the cell it leaves
pub fn move_monster(sim: &mut Sim<'_>, id: MonsterId, to: Coord) -> Result<()> {
    if sim.state.monsters.get(id).is_none() {
        return Err(CoreError::UnknownMonster(id));
    }
    restore_beneath(sim, id);
    let beneath = sim.level.tile_at(to);
    let region = sim.level.region_at(to);
    let m = sim.state.monsters.expect_mut(id)?;
    m.pos = to;
    m.tile_beneath = Some(beneath);
    m.region = region;
    redraw_monster(sim, id);
    Ok(())
}

/// Take a monster off the level, releasing any hold it had on the hero
pub fn remove_monster(sim: &mut Sim<'_>, id: MonsterId) -> Result<Monster> {
    if sim.state.monsters.get(id).is_none() {
        return Err(CoreError::UnknownMonster(id));
    }
    restore_beneath(sim, id);
    if sim.state.hero.is_held_by(id) {
        sim.state.hero.clear_hold();
    }
    sim.state
        .monsters
        .remove(id)
        .ok_or(CoreError::UnknownMonster(id))
}
