use crate::bounds::{BoundingBox, Point};
use thiserror::Error;

/// Errors raised while building an octree.
///
/// Queries never fail; only construction and insertion validate their input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctreeError {
    #[error("invalid bounds: min {min:?} must be finite and not exceed max {max:?}")]
    InvalidBounds { min: Point, max: Point },

    #[error("max depth {max_depth} exceeds the supported limit of {limit}")]
    DepthTooLarge { max_depth: u32, limit: u32 },

    #[error("point {position:?} has a non-finite coordinate")]
    NonFinite { position: Point },

    #[error("point {position:?} lies outside the index bounds {bounds:?}")]
    OutOfBounds { position: Point, bounds: BoundingBox },

    #[error("bulk build requires an empty index")]
    AlreadyPopulated,

    #[error("index was bulk built and no longer accepts single inserts")]
    Sealed,
}

pub type Result<T, E = OctreeError> = std::result::Result<T, E>;
