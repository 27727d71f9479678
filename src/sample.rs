//! Seeded random point sets and query boxes for tests, benches and demos.

use crate::bounds::BoundingBox;
use crate::record::PointRecord;
use rand::Rng;

/// Generates `count` points uniformly distributed in `bounds`.
///
/// Each record carries its generation index as payload.
pub fn random_records<R: Rng>(rng: &mut R, bounds: &BoundingBox, count: usize) -> Vec<PointRecord<usize>> {
    (0..count)
        .map(|i| PointRecord::new(random_point(rng, bounds), i))
        .collect()
}

/// A random box inside `bounds` whose side on each axis is at most `max_extent`
/// times the corresponding side of `bounds`. `max_extent` is clamped to `[0, 1]`.
pub fn random_query<R: Rng>(rng: &mut R, bounds: &BoundingBox, max_extent: f64) -> BoundingBox {
    let max_extent = max_extent.clamp(0.0, 1.0);
    let mut min = [0.0; 3];
    let mut max = [0.0; 3];
    for axis in 0..3 {
        let size = bounds.max[axis] - bounds.min[axis];
        let extent = rng.gen_range(0.0..=max_extent) * size;
        min[axis] = (bounds.min[axis] + rng.gen_range(0.0..=1.0) * (size - extent)).min(bounds.max[axis]);
        max[axis] = (min[axis] + extent).min(bounds.max[axis]);
    }
    BoundingBox::new(min, max)
}

fn random_point<R: Rng>(rng: &mut R, bounds: &BoundingBox) -> [f64; 3] {
    std::array::from_fn(|axis| {
        let size = bounds.max[axis] - bounds.min[axis];
        (bounds.min[axis] + rng.gen_range(0.0..=1.0) * size).min(bounds.max[axis])
    })
}
