//! Headless simulation loop with ASCII frame printouts.

use std::collections::VecDeque;

use engine::{MoveState, Runtime, Scenario, Terrain, TileLookup};
use glam::{ivec2, Vec2};
use util::HashMap;

use crate::Args;

pub fn run(mut game: Runtime, scenario: &Scenario, args: &Args) {
    let mut route: VecDeque<Vec2> = scenario
        .player
        .as_ref()
        .map(|p| p.route.iter().map(|&wp| Vec2::from(wp)).collect())
        .unwrap_or_default();
    let mut route_done = route.is_empty();

    print_legend();

    for tick in 0..args.ticks {
        feed_route(&mut game, &mut route, &mut route_done);
        game.tick(args.dt);

        if args.frame_every > 0 && tick % args.frame_every == 0 {
            print_frame(&game);
        }
    }

    print_frame(&game);
}

/// Keep the player walking its scripted waypoints; once the route is
/// exhausted, drop whatever it was carrying to show the reset.
fn feed_route(game: &mut Runtime, route: &mut VecDeque<Vec2>, done: &mut bool) {
    let Some(player) = game.player() else { return };
    if player.mover(game).state() != MoveState::Idle {
        return;
    }

    if let Some(waypoint) = route.pop_front() {
        if player.seek(game, waypoint).is_err() {
            log::warn!(
                "route waypoint {:.1},{:.1} is not reachable, skipping",
                waypoint.x,
                waypoint.y
            );
        }
    } else if !*done {
        *done = true;
        player.drop_carried(game);
    }
}

fn print_legend() {
    let legend: Vec<String> = Terrain::legend()
        .filter(|&(glyph, _)| glyph != ' ')
        .map(|(glyph, name)| format!("{glyph} {name}"))
        .collect();
    println!("legend: {}", legend.join(", "));
}

fn print_frame(game: &Runtime) {
    let map = game.map();

    let mut overlay: HashMap<glam::IVec2, char> = HashMap::default();
    for e in game.live_entities() {
        if let Some(pos) = e.pos(game) {
            overlay.insert(map.cell_of(pos), e.icon(game));
        }
    }

    println!("t={:.1}", game.now());
    for y in 0..map.height() {
        let mut line = String::new();
        for x in 0..map.width() {
            let cell = ivec2(x, y);
            line.push(
                overlay
                    .get(&cell)
                    .copied()
                    .unwrap_or_else(|| map.terrain_at(cell).glyph()),
            );
        }
        println!("{line}");
    }
}
