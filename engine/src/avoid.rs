//! Escape point search on the avoidance circle.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{MoveValidator, CIRCLE_SAMPLES, SWEEP_STEP_DEG, SWEEP_TRIES};

/// How an escape point is picked from the avoidance circle.
///
/// The two policies genuinely differ: `Farthest` runs from the threat as
/// far as terrain lets it, `Sweep` settles for the first legal point it
/// finds and can end up much closer.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AvoidPolicy {
    /// Sample the full circle around the threat and take the valid point
    /// farthest from the avoider.
    #[default]
    Farthest,
    /// Sweep around the avoider in angle steps starting on the threat's
    /// side and take the first valid point.
    Sweep,
}

/// Find an escape point on a circle of `radius`, or nothing if every
/// candidate fails validation.
///
/// Callers must not move an agent on a `None` result.
pub fn avoid_point(
    v: &MoveValidator,
    avoider: Vec2,
    threat: Vec2,
    radius: f32,
    policy: AvoidPolicy,
) -> Option<Vec2> {
    match policy {
        AvoidPolicy::Farthest => farthest_on_circle(v, avoider, threat, radius),
        AvoidPolicy::Sweep => sweep_from_side(v, avoider, threat, radius),
    }
}

/// Evenly sample the circle centered on the threat, keep the valid
/// candidate with the greatest distance from the avoider.
fn farthest_on_circle(
    v: &MoveValidator,
    avoider: Vec2,
    threat: Vec2,
    radius: f32,
) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;

    for i in 0..CIRCLE_SAMPLES {
        let angle = TAU * i as f32 / CIRCLE_SAMPLES as f32;
        let p = threat + Vec2::from_angle(angle) * radius;
        if !v.is_allowed(p) {
            continue;
        }

        let d = avoider.distance_squared(p);
        if best.map_or(true, |(top, _)| d > top) {
            best = Some((d, p));
        }
    }

    best.map(|(_, p)| p)
}

/// Walk the circle centered on the avoider in fixed angle steps and
/// return the first valid candidate.
///
/// The threat's side picks the sweep start and winding: threat strictly
/// to the right starts at 0 degrees winding positive, otherwise 180
/// degrees winding negative.
fn sweep_from_side(
    v: &MoveValidator,
    avoider: Vec2,
    threat: Vec2,
    radius: f32,
) -> Option<Vec2> {
    let threat_on_right = threat.x > avoider.x;
    let (start, step) = if threat_on_right {
        (0.0, SWEEP_STEP_DEG)
    } else {
        (180.0, -SWEEP_STEP_DEG)
    };

    for i in 0..SWEEP_TRIES {
        let deg = start + i as f32 * step;
        let p = avoider + Vec2::from_angle(deg.to_radians()) * radius;
        if v.is_allowed(p) {
            return Some(p);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;
    use crate::{Terrain, TileAccess, TileLookup, TileMap};

    fn ground_field(size: u32) -> TileMap {
        let row = ".".repeat(size as usize);
        let text = vec![row; size as usize].join("\n");
        text.parse().unwrap()
    }

    fn farthest_candidate(threat: Vec2, radius: f32, i: u32) -> Vec2 {
        let angle = TAU * i as f32 / CIRCLE_SAMPLES as f32;
        threat + Vec2::from_angle(angle) * radius
    }

    #[test]
    fn farthest_avoids_blocked_arc() {
        let mut map = ground_field(20);
        let access = TileAccess::new([Terrain::Ground]);

        let threat = vec2(8.5, 8.5);
        let avoider = threat + vec2(10.0, 0.0);
        let radius = 5.0;

        // Block the arc facing directly away from the avoider, samples at
        // 157.5, 180 and 202.5 degrees.
        for i in [7, 8, 9] {
            let cell = map.cell_of(farthest_candidate(threat, radius, i));
            map.set_terrain(cell, Terrain::Water);
        }

        let v = MoveValidator::new(&map, &access);
        let p = avoid_point(&v, avoider, threat, radius, AvoidPolicy::Farthest)
            .unwrap();

        // The winner borders the blocked arc on its far side, at 135 or
        // 225 degrees. The two are tied in exact math, either may win the
        // strict comparison in floats.
        let upper = farthest_candidate(threat, radius, 6);
        let lower = farthest_candidate(threat, radius, 10);
        assert!(p.distance(upper) < 1e-4 || p.distance(lower) < 1e-4);
    }

    #[test]
    fn farthest_with_open_circle_runs_opposite() {
        let map = ground_field(20);
        let access = TileAccess::new([Terrain::Ground]);
        let threat = vec2(8.5, 8.5);
        let avoider = threat + vec2(10.0, 0.0);

        let v = MoveValidator::new(&map, &access);
        let p = avoid_point(&v, avoider, threat, 5.0, AvoidPolicy::Farthest)
            .unwrap();

        // Sample 8 points straight away from the avoider.
        assert!(p.distance(threat + vec2(-5.0, 0.0)) < 1e-4);
    }

    #[test]
    fn sweep_takes_first_valid() {
        let mut map = ground_field(20);
        let access = TileAccess::new([Terrain::Ground]);

        let avoider = vec2(8.5, 8.5);
        let threat = vec2(13.5, 8.5);
        let radius = 5.0;

        // Threat is on the right, sweep starts at 0 degrees winding
        // positive. Block the first three samples.
        for i in 0..3 {
            let deg = SWEEP_STEP_DEG * i as f32;
            let p = avoider + Vec2::from_angle(deg.to_radians()) * radius;
            map.set_terrain(map.cell_of(p), Terrain::Water);
        }

        let v = MoveValidator::new(&map, &access);
        let p = avoid_point(&v, avoider, threat, radius, AvoidPolicy::Sweep)
            .unwrap();

        let expected =
            avoider + Vec2::from_angle((3.0 * SWEEP_STEP_DEG).to_radians()) * radius;
        assert!(p.distance(expected) < 1e-4);
    }

    #[test]
    fn sweep_starts_opposite_when_threat_is_left() {
        let map = ground_field(20);
        let access = TileAccess::new([Terrain::Ground]);

        let avoider = vec2(8.5, 8.5);
        let threat = vec2(3.5, 8.5);

        let v = MoveValidator::new(&map, &access);
        let p = avoid_point(&v, avoider, threat, 5.0, AvoidPolicy::Sweep)
            .unwrap();

        // First sample at 180 degrees is open and wins immediately.
        assert!(p.distance(avoider + vec2(-5.0, 0.0)) < 1e-4);
    }

    #[test]
    fn no_valid_candidate_reports_not_found() {
        let map = ground_field(20);
        // Permissions admit nothing, every candidate fails.
        let access = TileAccess::new([Terrain::Water]);
        let v = MoveValidator::new(&map, &access);

        let avoider = vec2(8.5, 8.5);
        let threat = vec2(10.5, 8.5);

        for policy in [AvoidPolicy::Farthest, AvoidPolicy::Sweep] {
            assert_eq!(avoid_point(&v, avoider, threat, 5.0, policy), None);
        }
    }
}
