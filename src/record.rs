use crate::bounds::{BoundingBox, Point};
use crate::error::{OctreeError, Result};

/// A point in space together with a caller-defined payload.
///
/// The position cannot change once the record is created.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord<P = ()> {
    position: Point,
    data: P,
}

impl PointRecord<()> {
    /// Creates a record without payload.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z], ())
    }
}

impl<P> PointRecord<P> {
    pub fn new(position: Point, data: P) -> Self {
        Self { position, data }
    }

    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn data(&self) -> &P {
        &self.data
    }

    pub fn into_data(self) -> P {
        self.data
    }

    /// Checks that the record can be stored in an index with the given bounds.
    pub(crate) fn validate(&self, bounds: &BoundingBox) -> Result<()> {
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(OctreeError::NonFinite { position: self.position });
        }
        if !bounds.contains(&self.position) {
            return Err(OctreeError::OutOfBounds { position: self.position, bounds: *bounds });
        }
        Ok(())
    }
}

impl<P> From<(Point, P)> for PointRecord<P> {
    fn from((position, data): (Point, P)) -> Self {
        Self::new(position, data)
    }
}
