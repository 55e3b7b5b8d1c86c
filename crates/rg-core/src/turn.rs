//! The turn loop boundary
//!
//! One call to [`run_turn`] is one tick of game time: the hero acts (or
//! sleeps), then the monsters, timers and the wandering-monster clock get
//! their go. Internal errors stop at this boundary.

use crate::consts::WANDER_TIME;
use crate::error::Result;
use crate::monster::{run_monsters, wake_nearby, wanderer_event};
use crate::player::{DeathCause, HeroFlags};
use crate::state::Sim;

/// Result of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Continue playing
    Continue,
    /// The hero is dead
    HeroDied(DeathCause),
}

/// Run one turn with `action` as the hero's move
///
/// `action` reports whether it used up time. A frozen or sleeping hero
/// loses the move without `action` being called. If `action` fails the
/// error is logged and no time passes.
pub fn run_turn<F>(sim: &mut Sim<'_>, action: F) -> TurnOutcome
where
    F: FnOnce(&mut Sim<'_>) -> Result<bool>,
{
    if let Some(cause) = sim.state.death {
        return TurnOutcome::HeroDied(cause);
    }

    let took_time = if sim.state.hero.sleep_turns > 0 {
        sim.state.hero.sleep_turns -= 1;
        true
    } else {
        match action(sim) {
            Ok(took_time) => took_time,
            Err(err) => {
                tracing::error!(%err, turn = sim.state.turns, "hero action aborted");
                false
            }
        }
    };
    if !took_time {
        return outcome(sim);
    }
    if sim.state.is_hero_dead() {
        return outcome(sim);
    }

    if let Err(err) = monsters_act(sim) {
        tracing::error!(%err, turn = sim.state.turns, "monster phase aborted");
    }
    tick_hero_timers(sim);
    roll_wanderer(sim);
    sim.state.turns += 1;
    outcome(sim)
}

fn outcome(sim: &Sim<'_>) -> TurnOutcome {
    match sim.state.death {
        Some(cause) => TurnOutcome::HeroDied(cause),
        None => TurnOutcome::Continue,
    }
}

fn monsters_act(sim: &mut Sim<'_>) -> Result<()> {
    wake_nearby(sim)?;
    run_monsters(sim)
}

fn tick_hero_timers(sim: &mut Sim<'_>) {
    let hero = &mut sim.state.hero;
    if hero.flags.contains(HeroFlags::CONFUSED) {
        hero.confused_turns = hero.confused_turns.saturating_sub(1);
        if hero.confused_turns == 0 {
            hero.flags.remove(HeroFlags::CONFUSED);
            sim.msg("you feel less confused now");
        }
    }
}

/// Every fourth turn there is a 1 in 6 chance of a wandering monster;
/// after one shows up the clock rests for a while
fn roll_wanderer(sim: &mut Sim<'_>) {
    if sim.state.wander_delay > 0 {
        sim.state.wander_delay -= 1;
        return;
    }
    if sim.state.turns % 4 == 3 && sim.state.rng.roll(1, 6) == 4 {
        wanderer_event(sim);
        sim.state.wander_delay = WANDER_TIME;
    }
}
