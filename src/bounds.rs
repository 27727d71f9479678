/// A position in 3D space, `[x, y, z]`.
pub type Point = [f64; 3];

/// Number of children of an internal octree node.
pub const OCTANTS: usize = 8;

/// Axis-aligned bounding box in 3D space.
///
/// The box is closed: a point lying exactly on a face is inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Returns `true` if every coordinate is finite and `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|axis| {
            self.min[axis].is_finite() && self.max[axis].is_finite() && self.min[axis] <= self.max[axis]
        })
    }

    /// The per-axis midpoint, used as the partition plane of a node.
    pub fn mid(&self) -> Point {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Closed-interval containment test on every axis.
    pub fn contains(&self, p: &Point) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] &&
        p[1] >= self.min[1] && p[1] <= self.max[1] &&
        p[2] >= self.min[2] && p[2] <= self.max[2]
    }

    /// Returns `true` unless the boxes are separated on some axis.
    ///
    /// Touching faces count as overlap.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max[0] < other.min[0] || self.max[1] < other.min[1] || self.max[2] < other.min[2] ||
          self.min[0] > other.max[0] || self.min[1] > other.max[1] || self.min[2] > other.max[2])
    }

    /// Returns `true` if `self` lies strictly inside `outer` on every axis.
    pub fn strictly_inside(&self, outer: &BoundingBox) -> bool {
        (0..3).all(|axis| outer.min[axis] < self.min[axis] && self.max[axis] < outer.max[axis])
    }

    /// Octant code of `p` relative to the midpoint of this box.
    ///
    /// Bit 0 is set when `x >= mid.x`, bit 1 for Y and bit 2 for Z. A coordinate
    /// equal to the midpoint goes to the upper half, matching `below_mid`.
    pub fn octant_of(&self, p: &Point) -> usize {
        let mid = self.mid();
        let mut code = 0;
        for axis in 0..3 {
            if !below_mid(p[axis], mid[axis]) {
                code |= 1 << axis;
            }
        }
        code
    }

    /// The box of child `code` when this box is split at its midpoint.
    pub fn octant(&self, code: usize) -> BoundingBox {
        let mid = self.mid();
        let mut min = self.min;
        let mut max = mid;
        for axis in 0..3 {
            if code & (1 << axis) != 0 {
                min[axis] = mid[axis];
                max[axis] = self.max[axis];
            }
        }
        BoundingBox { min, max }
    }

    /// All eight child boxes, indexed by octant code.
    pub fn octants(&self) -> [BoundingBox; OCTANTS] {
        std::array::from_fn(|code| self.octant(code))
    }
}

/// The split predicate shared by routing and partitioning: `true` sends a
/// coordinate to the lower half.
#[inline]
pub(crate) fn below_mid(coord: f64, mid: f64) -> bool {
    coord < mid
}
