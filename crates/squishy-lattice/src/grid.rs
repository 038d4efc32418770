//! Uniform-grid spatial hash over lattice points.
//!
//! Bins point indices into cubic cells so that radius queries and pair
//! searches only visit the 27 cells around a point. The cell size must be
//! at least the query radius for the 3×3×3 neighbourhood to be complete.

use std::collections::HashMap;

use glam::Vec3;

type CellKey = (i32, i32, i32);

/// Spatial hash of indexed points.
#[derive(Debug, Clone)]
pub struct PointGrid {
    /// Inverse cell size (cached).
    inv_cell_size: f32,
    cells: HashMap<CellKey, Vec<u32>>,
    points: Vec<Vec3>,
}

impl PointGrid {
    /// Creates an empty grid with the given cell size.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = cell_size.max(1e-6);
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// Builds a grid over `points`; point `i` gets index `i`.
    pub fn from_points(cell_size: f32, points: &[Vec3]) -> Self {
        let mut grid = Self::new(cell_size);
        for &p in points {
            grid.insert(p);
        }
        grid
    }

    fn cell_key(&self, p: Vec3) -> CellKey {
        (
            (p.x * self.inv_cell_size).floor() as i32,
            (p.y * self.inv_cell_size).floor() as i32,
            (p.z * self.inv_cell_size).floor() as i32,
        )
    }

    /// Adds a point and returns its index.
    pub fn insert(&mut self, p: Vec3) -> u32 {
        let index = self.points.len() as u32;
        let key = self.cell_key(p);
        self.cells.entry(key).or_default().push(index);
        self.points.push(p);
        index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn neighbourhood(&self, key: CellKey) -> impl Iterator<Item = &u32> + '_ {
        let (cx, cy, cz) = key;
        (-1..=1_i32)
            .flat_map(move |dx| {
                (-1..=1_i32).flat_map(move |dy| (-1..=1_i32).map(move |dz| (dx, dy, dz)))
            })
            .filter_map(move |(dx, dy, dz)| self.cells.get(&(cx + dx, cy + dy, cz + dz)))
            .flatten()
    }

    /// True if any stored point lies within `radius` of `p` (inclusive).
    pub fn any_within(&self, p: Vec3, radius: f32) -> bool {
        let r2 = radius * radius;
        self.neighbourhood(self.cell_key(p))
            .any(|&i| self.points[i as usize].distance_squared(p) <= r2)
    }

    /// All index pairs `(a, b)` with `a < b` whose distance is strictly
    /// below `max_distance`, sorted by `a` then `b`, with their distance.
    pub fn pairs_within(&self, max_distance: f32) -> Vec<(u32, u32, f32)> {
        let d2 = max_distance * max_distance;
        let mut pairs = Vec::new();

        for (a, &pa) in self.points.iter().enumerate() {
            let a = a as u32;
            for &b in self.neighbourhood(self.cell_key(pa)) {
                if b <= a {
                    continue;
                }
                let dist2 = self.points[b as usize].distance_squared(pa);
                if dist2 < d2 {
                    pairs.push((a, b, dist2.sqrt()));
                }
            }
        }

        pairs.sort_unstable_by_key(|&(a, b, _)| (a, b));
        pairs
    }
}
