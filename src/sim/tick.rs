//! Fixed timestep simulation tick
//!
//! Order within a tick is fixed: runner, camera, backdrop, mousehole, then
//! layer A and layer B each recycled and arbitrated against the other.

use super::arbiter::arbitrate;
use super::decoration::{LayerId, SlotId};
use super::recycle::recycle;
use super::state::{RecycleEvent, WorldState};

/// Advance the world by one fixed timestep
pub fn tick(state: &mut WorldState, dt: f64) {
    state.time_ticks += 1;
    state.events.clear();

    state.runner.advance(dt);
    state.camera.follow(state.runner.pos.x);

    step_world(state);

    log::trace!(
        "Tick {}: scroll_x={:.1}, {} recycles",
        state.time_ticks,
        state.camera.scroll_x(),
        state.events.len()
    );
}

/// Bring backdrop and decorations up to date with the current camera.
///
/// Placement is driven purely by scroll position, so this takes no timestep.
pub fn step_world(state: &mut WorldState) {
    let WorldState {
        rng,
        camera,
        background,
        mousehole,
        layers,
        events,
        stats,
        ..
    } = state;
    let viewport = camera.viewport;

    background.sync(viewport.scroll_x);

    if recycle(mousehole, &viewport, rng) {
        stats.mousehole_recycles += 1;
        events.push(RecycleEvent {
            slot: SlotId::Mousehole,
            x: mousehole.pos.x,
            visible: mousehole.visible,
        });
    }

    // Both layers arbitrate against where their sibling stood before this tick
    let snapshots = [layers[0].snapshot(), layers[1].snapshot()];

    for id in LayerId::ALL {
        let sibling = snapshots[id.other().index()];
        for (slot, decoration) in layers[id.index()].slots.iter_mut().enumerate() {
            if !recycle(decoration, &viewport, rng) {
                continue;
            }
            let visible = arbitrate(decoration, sibling.as_slice());
            stats.layer_recycles[id.index()] += 1;
            if !visible {
                stats.hidden += 1;
            }
            events.push(RecycleEvent {
                slot: SlotId::Layer { layer: id, slot },
                x: decoration.pos.x,
                visible,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::consts::SIM_DT;
    use crate::sim::arbiter::overlaps;
    use crate::sim::decoration::SpawnWindow;

    fn run_seconds(state: &mut WorldState, secs: f64) {
        let ticks = (secs / SIM_DT).round() as u64;
        for _ in 0..ticks {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_camera_follows_runner() {
        let mut state = WorldState::new(&WorldConfig::default()).unwrap();
        run_seconds(&mut state, 5.0);
        // 400 start + 1000 travelled, centred in an 800 wide view
        assert!((state.camera.scroll_x() - 1000.0).abs() < 1e-6);
        assert_eq!(state.background.tile_offset, state.camera.scroll_x());
        assert_eq!(state.time_ticks, 600);
    }

    #[test]
    fn test_nothing_recycles_before_scrolling() {
        let mut state = WorldState::new(&WorldConfig::default()).unwrap();
        let before = state.frame().decorations;
        tick(&mut state, SIM_DT);
        assert!(state.events.is_empty());
        assert_eq!(state.frame().decorations, before);
    }

    #[test]
    fn test_long_run_keeps_pool_ahead() {
        let mut state = WorldState::new(&WorldConfig::with_seed(7)).unwrap();
        for _ in 0..120 * 120 {
            tick(&mut state, SIM_DT);
            let scroll_x = state.camera.scroll_x();
            for d in state.decorations() {
                assert!(d.pos.x + d.clearance >= scroll_x, "{} left behind", d.name);
            }
            assert_eq!(state.decoration_count(), 5);
        }
        assert!(state.stats.mousehole_recycles > 0);
        assert!(state.stats.layer_recycles.iter().all(|&n| n > 0));
        assert_eq!(
            state.stats.total_recycles(),
            state.decorations().map(|d| d.recycles as u64).sum::<u64>()
        );
    }

    #[test]
    fn test_mousehole_never_hidden() {
        let mut state = WorldState::new(&WorldConfig::with_seed(3)).unwrap();
        for _ in 0..120 * 60 {
            tick(&mut state, SIM_DT);
            assert!(state.mousehole.visible);
        }
    }

    #[test]
    fn test_recycle_then_arbitrate_scenario() {
        let mut state = WorldState::new(&WorldConfig::default()).unwrap();
        state.camera.viewport.scroll_x = 0.0;

        let window1 = &mut state.layers[0].slots[0];
        window1.width = 40.0;
        window1.clearance = 80.0;
        window1.window.lead = 80.0;
        window1.pos.x = -90.0;

        // Park every other decoration well ahead so only window1 recycles
        state.layers[0].slots[1].pos.x = 5000.0;
        state.layers[1].slots[0].pos.x = 900.0;
        state.layers[1].slots[1].pos.x = 5000.0;
        state.mousehole.pos.x = 5000.0;

        step_world(&mut state);

        assert_eq!(state.events.len(), 1);
        let event = state.events[0];
        assert_eq!(
            event.slot,
            SlotId::Layer {
                layer: LayerId::A,
                slot: 0
            }
        );
        assert!((880.0..=1680.0).contains(&event.x));
        let expect_visible = (event.x - 900.0).abs() > 40.0;
        assert_eq!(event.visible, expect_visible);
        assert_eq!(state.layers[0].slots[0].visible, expect_visible);
    }

    #[test]
    fn test_layers_arbitrate_against_pre_tick_positions() {
        let mut state = WorldState::new(&WorldConfig::default()).unwrap();
        state.camera.viewport.scroll_x = 10_000.0;
        let right_edge = state.camera.viewport.right_edge();
        state.mousehole.pos.x = 1.0e9;
        state.layers[0].slots[1].pos.x = 9.0e9;
        state.layers[1].slots[1].pos.x = 9.0e9;

        // Both off-screen; zero-spread windows land B0 10px from A0's new spot
        let window1 = &mut state.layers[0].slots[0];
        window1.width = 40.0;
        window1.clearance = 80.0;
        window1.window = SpawnWindow::new(80.0, 0.0);
        window1.pos.x = 0.0;

        let bookcase1 = &mut state.layers[1].slots[0];
        bookcase1.width = 40.0;
        bookcase1.clearance = 90.0;
        bookcase1.window = SpawnWindow::new(90.0, 0.0);
        bookcase1.pos.x = 0.0;

        step_world(&mut state);

        assert_eq!(state.events.len(), 2);
        let window1 = &state.layers[0].slots[0];
        let bookcase1 = &state.layers[1].slots[0];
        assert_eq!(window1.x(), right_edge + 80.0);
        assert_eq!(bookcase1.x(), right_edge + 90.0);

        // They clash where they stand now, but B0 was judged against A0's old x
        assert!(overlaps(bookcase1, window1.x()));
        assert!(window1.visible);
        assert!(bookcase1.visible);
    }

    #[test]
    fn test_hidden_stays_hidden_until_own_recycle() {
        let mut state = WorldState::new(&WorldConfig::default()).unwrap();
        state.mousehole.pos.x = 1.0e9;
        state.layers[0].slots[0].pos.x = 1.0e9;
        state.layers[0].slots[0].visible = false;
        state.layers[0].slots[1].pos.x = 9.0e9;

        // No sibling is anywhere near the hidden window, and B0 recycles this step
        state.layers[1].slots[0].pos.x = -1.0e6;
        state.layers[1].slots[1].pos.x = 9.0e9;

        step_world(&mut state);

        assert_eq!(state.events.len(), 1);
        assert_eq!(
            state.events[0].slot,
            SlotId::Layer {
                layer: LayerId::B,
                slot: 0
            }
        );
        assert_eq!(state.layers[0].slots[0].x(), 1.0e9);
        assert!(!state.layers[0].slots[0].visible);

        // Its own recycle is what re-evaluates it
        state.camera.viewport.scroll_x = 1.0e9 + 1000.0;
        step_world(&mut state);
        let window1 = &state.layers[0].slots[0];
        assert_eq!(window1.recycles, 1);
        assert!(window1.x() > state.camera.viewport.right_edge());
        assert!(window1.visible);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = WorldState::new(&WorldConfig::with_seed(99999)).unwrap();
        let mut state2 = WorldState::new(&WorldConfig::with_seed(99999)).unwrap();

        for _ in 0..120 * 30 {
            tick(&mut state1, SIM_DT);
            tick(&mut state2, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.frame(), state2.frame());
    }
}
