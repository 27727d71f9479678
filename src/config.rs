use crate::error::{OctreeError, Result};

/// Construction parameters shared by both octree engines.
///
/// Both values are fixed once an index is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Number of subdivision levels below the root. A node at this depth never splits.
    pub max_depth: u32,
    /// Maximum number of points a leaf holds before a split is attempted.
    pub capacity: usize,
}

impl OctreeConfig {
    /// Deepest subdivision accepted. Halving an `f64` interval stops producing
    /// distinct midpoints well before this many levels.
    pub const MAX_DEPTH: u32 = 1024;

    pub fn new(max_depth: u32, capacity: usize) -> Self {
        Self { max_depth, capacity }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_depth > Self::MAX_DEPTH {
            return Err(OctreeError::DepthTooLarge { max_depth: self.max_depth, limit: Self::MAX_DEPTH });
        }
        Ok(())
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self { max_depth: 8, capacity: 256 }
    }
}
