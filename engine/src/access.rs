//! Per-agent terrain permissions.

use std::collections::BTreeSet;

use crate::Terrain;

/// The set of terrains an agent may currently stand on.
///
/// A base set is configured at construction. Capabilities the agent gains
/// later (a carried item, say) stack on top of it as additive overlays
/// that `reset` peels off again. Membership is always decided against the
/// union of the base and every overlay.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TileAccess {
    /// The base the set was constructed with, `reset` returns to this.
    default_base: BTreeSet<Terrain>,
    base: BTreeSet<Terrain>,
    overlays: Vec<BTreeSet<Terrain>>,
}

impl TileAccess {
    pub fn new(base: impl IntoIterator<Item = Terrain>) -> Self {
        let base: BTreeSet<Terrain> = base.into_iter().collect();
        TileAccess {
            default_base: base.clone(),
            base,
            overlays: Vec::new(),
        }
    }

    /// Whether the terrain is currently enterable.
    ///
    /// `Terrain::Void` gets no special treatment, walking on unpainted
    /// cells takes an explicit grant like everything else.
    pub fn allows(&self, t: Terrain) -> bool {
        self.base.contains(&t) || self.overlays.iter().any(|o| o.contains(&t))
    }

    /// Snapshot of the effective set, base and overlays combined.
    pub fn effective(&self) -> BTreeSet<Terrain> {
        let mut ret = self.base.clone();
        for overlay in &self.overlays {
            ret.extend(overlay.iter().copied());
        }
        ret
    }

    /// Replace the active base, discarding all overlays.
    ///
    /// An empty replacement is refused and the set is left as it was.
    pub fn replace(&mut self, tiles: impl IntoIterator<Item = Terrain>) {
        let tiles: BTreeSet<Terrain> = tiles.into_iter().collect();
        if tiles.is_empty() {
            log::warn!("TileAccess::replace: empty replacement, keeping current set");
            return;
        }
        self.base = tiles;
        self.overlays.clear();
    }

    /// Stack an overlay of additional terrains on top of the current set.
    ///
    /// An empty overlay is refused.
    pub fn extend(&mut self, tiles: impl IntoIterator<Item = Terrain>) {
        let tiles: BTreeSet<Terrain> = tiles.into_iter().collect();
        if tiles.is_empty() {
            log::warn!("TileAccess::extend: empty overlay, nothing added");
            return;
        }
        self.overlays.push(tiles);
    }

    /// Return to the originally configured base, dropping overlays and
    /// any base replacement.
    pub fn reset(&mut self) {
        self.base = self.default_base.clone();
        self.overlays.clear();
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::Terrain::*;

    const ALL: [Terrain; 8] =
        [Void, Ground, Grass, Water, Crag, Rock, Gravel, Wall];

    // Local wrapper since Arbitrary can't be implemented for Terrain from
    // inside a test module.
    #[derive(Copy, Clone, Debug)]
    struct Tile(Terrain);

    impl Arbitrary for Tile {
        fn arbitrary(g: &mut Gen) -> Self {
            Tile(*g.choose(&ALL).unwrap())
        }
    }

    #[test]
    fn membership() {
        let access = TileAccess::new([Ground, Grass]);
        assert!(access.allows(Ground));
        assert!(access.allows(Grass));
        assert!(!access.allows(Water));
        assert!(!access.allows(Void));

        // Unpainted cells are enterable only with an explicit grant.
        let ghost = TileAccess::new([Void]);
        assert!(ghost.allows(Void));
        assert!(!ghost.allows(Ground));
    }

    #[test]
    fn empty_input_is_a_noop() {
        let mut access = TileAccess::new([Ground]);
        let before = access.clone();

        access.extend([]);
        assert_eq!(access, before);

        access.replace([]);
        assert_eq!(access, before);
    }

    #[test]
    fn replace_discards_overlays() {
        let mut access = TileAccess::new([Ground]);
        access.extend([Water]);
        assert!(access.allows(Water));

        access.replace([Grass]);
        assert!(!access.allows(Ground));
        assert!(!access.allows(Water));
        assert!(access.allows(Grass));
    }

    #[quickcheck]
    fn overlay_union_is_idempotent(overlays: Vec<Vec<Tile>>) -> bool {
        let base = [Ground];

        let mut piecewise = TileAccess::new(base);
        for overlay in &overlays {
            piecewise.extend(overlay.iter().map(|t| t.0));
        }

        let mut at_once = TileAccess::new(base);
        at_once
            .extend(overlays.iter().flatten().map(|t| t.0));

        ALL.iter()
            .all(|&t| piecewise.allows(t) == at_once.allows(t))
    }

    #[quickcheck]
    fn reset_restores_base(base: Vec<Tile>, ops: Vec<(bool, Vec<Tile>)>) -> bool {
        let base: Vec<Terrain> = base.iter().map(|t| t.0).collect();
        let mut access = TileAccess::new(base.iter().copied());
        let configured = access.effective();

        for (is_replace, tiles) in ops {
            let tiles = tiles.iter().map(|t| t.0);
            if is_replace {
                access.replace(tiles);
            } else {
                access.extend(tiles);
            }
        }

        access.reset();
        access.effective() == configured
    }
}
