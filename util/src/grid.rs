use glam::{ivec2, IVec2, Vec2};

use crate::HashMap;

/// A cell-bucketed index for point sets, for efficiently retrieving the
/// points that fall within a radius of a query position.
///
/// The index is cheap enough to rebuild from scratch whenever the point
/// set changes, there is no update operation.
#[derive(Clone)]
pub struct PointGrid {
    /// Bucket cell size, never changes after construction.
    cell: f32,

    /// Inserted points, position index is point identity.
    points: Vec<Vec2>,

    /// Map from bucket cells to points inside the cell.
    buckets: HashMap<IVec2, Vec<usize>>,
}

impl PointGrid {
    /// Creates a new index with the given bucket cell size.
    ///
    /// Queries are fastest when the cell size is close to the typical
    /// query radius.
    pub fn new(cell: f32) -> Self {
        assert!(cell > 0.0, "zero size grid cell");
        PointGrid {
            cell,
            points: Default::default(),
            buckets: Default::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a point, returns an identifier that can be used to refer to
    /// it.
    pub fn insert(&mut self, p: Vec2) -> usize {
        let id = self.points.len();
        self.points.push(p);
        self.buckets.entry(self.bucket(p)).or_default().push(id);
        id
    }

    /// Get a point by its identifier.
    pub fn get(&self, id: usize) -> Option<Vec2> {
        self.points.get(id).copied()
    }

    /// Iterate identifiers and positions of points within `radius` of
    /// `center`.
    pub fn within(
        &self,
        center: Vec2,
        radius: f32,
    ) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        let min = self.bucket(center - Vec2::splat(radius));
        let max = self.bucket(center + Vec2::splat(radius));
        let r2 = radius * radius;

        (min.y..=max.y)
            .flat_map(move |y| (min.x..=max.x).map(move |x| ivec2(x, y)))
            .filter_map(move |c| self.buckets.get(&c))
            .flatten()
            .filter_map(move |&id| {
                let p = self.points[id];
                (center.distance_squared(p) <= r2).then_some((id, p))
            })
    }

    fn bucket(&self, p: Vec2) -> IVec2 {
        (p / self.cell).floor().as_ivec2()
    }
}
