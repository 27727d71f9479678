use crate::algorithm::bulk::BulkOctree;
use crate::algorithm::incremental::IncrementalOctree;
use crate::algorithm::PointCloud;
use crate::bounds::{BoundingBox, Point};
use crate::config::OctreeConfig;
use crate::error::{OctreeError, Result};
use crate::node::{LeafInfo, TreeStats};
use crate::record::PointRecord;
use tracing::debug;

enum Engine<P> {
    Incremental(IncrementalOctree<P>),
    Bulk(BulkOctree<P>),
}

/// A 3D point index answering axis-aligned box queries.
///
/// The index starts out empty and accepts points either one at a time with
/// [`insert`](PointCloud::insert), or all at once with [`Octree::insert_bulk`].
/// The two cannot be mixed: a bulk load requires an empty index, and a
/// bulk-built index refuses further single inserts.
///
/// Points must lie inside the bounds given at construction; anything else is
/// rejected with [`OctreeError::OutOfBounds`].
pub struct Octree<P = ()> {
    engine: Engine<P>,
}

impl<P> Octree<P> {
    /// Creates an empty index.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The region of space covered by the index.
    /// * `config` - Maximum depth and leaf capacity, fixed for the lifetime of the index.
    pub fn new(bounds: BoundingBox, config: OctreeConfig) -> Result<Self> {
        let tree = IncrementalOctree::new(bounds, config)?;
        debug!(?bounds, ?config, "created octree");
        Ok(Octree { engine: Engine::Incremental(tree) })
    }

    /// Shorthand for [`Octree::new`] taking the corners and parameters directly.
    pub fn with_depth_and_capacity(min: Point, max: Point, max_depth: u32, capacity: usize) -> Result<Self> {
        Self::new(BoundingBox::new(min, max), OctreeConfig::new(max_depth, capacity))
    }

    /// Builds the index from a complete point set by in-place partitioning.
    ///
    /// Only allowed while the index is empty. On error the index is unchanged.
    pub fn insert_bulk(&mut self, records: impl IntoIterator<Item = PointRecord<P>>) -> Result<()> {
        if !self.is_empty() {
            return Err(OctreeError::AlreadyPopulated);
        }
        let tree = BulkOctree::build(*self.bounds(), records.into_iter().collect(), *self.config())?;
        self.engine = Engine::Bulk(tree);
        Ok(())
    }

    /// Returns `true` once the index has been bulk built.
    pub fn is_bulk(&self) -> bool {
        matches!(self.engine, Engine::Bulk(_))
    }

    pub fn bounds(&self) -> &BoundingBox {
        match &self.engine {
            Engine::Incremental(tree) => tree.bounds(),
            Engine::Bulk(tree) => tree.bounds(),
        }
    }

    pub fn config(&self) -> &OctreeConfig {
        match &self.engine {
            Engine::Incremental(tree) => tree.config(),
            Engine::Bulk(tree) => tree.config(),
        }
    }

    /// All stored records. The order is unspecified.
    pub fn records(&self) -> &[PointRecord<P>] {
        match &self.engine {
            Engine::Incremental(tree) => tree.records(),
            Engine::Bulk(tree) => tree.records(),
        }
    }

    pub fn stats(&self) -> TreeStats {
        match &self.engine {
            Engine::Incremental(tree) => tree.stats(),
            Engine::Bulk(tree) => tree.stats(),
        }
    }

    pub fn leaves(&self) -> Vec<LeafInfo> {
        match &self.engine {
            Engine::Incremental(tree) => tree.leaves(),
            Engine::Bulk(tree) => tree.leaves(),
        }
    }

    pub fn leaf_contents(&self) -> Vec<(LeafInfo, Vec<&PointRecord<P>>)> {
        match &self.engine {
            Engine::Incremental(tree) => tree.leaf_contents(),
            Engine::Bulk(tree) => tree.leaf_contents(),
        }
    }
}

impl<P> PointCloud<P> for Octree<P> {
    fn insert(&mut self, record: PointRecord<P>) -> Result<()> {
        match &mut self.engine {
            Engine::Incremental(tree) => tree.insert(record),
            Engine::Bulk(_) => Err(OctreeError::Sealed),
        }
    }

    fn visit<'a, F>(&'a self, min: Point, max: Point, visitor: F)
    where
        P: 'a,
        F: FnMut(&'a PointRecord<P>),
    {
        match &self.engine {
            Engine::Incremental(tree) => tree.visit(min, max, visitor),
            Engine::Bulk(tree) => tree.visit(min, max, visitor),
        }
    }

    fn len(&self) -> usize {
        match &self.engine {
            Engine::Incremental(tree) => tree.len(),
            Engine::Bulk(tree) => tree.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Octree<usize> {
        Octree::with_depth_and_capacity([0.0; 3], [1.0; 3], 3, 2).unwrap()
    }

    #[test]
    fn test_bulk_then_insert_is_sealed() {
        let mut octree = index();
        octree
            .insert_bulk((0..5).map(|i| PointRecord::new([i as f64 / 5.0; 3], i)))
            .unwrap();
        assert!(octree.is_bulk());
        assert_eq!(octree.len(), 5);
        assert_eq!(octree.insert(PointRecord::new([0.5; 3], 9)), Err(OctreeError::Sealed));
    }

    #[test]
    fn test_bulk_requires_empty_index() {
        let mut octree = index();
        octree.insert(PointRecord::new([0.5; 3], 0)).unwrap();
        let result = octree.insert_bulk(vec![PointRecord::new([0.1; 3], 1)]);
        assert_eq!(result, Err(OctreeError::AlreadyPopulated));
        assert!(!octree.is_bulk());
        assert_eq!(octree.len(), 1);
    }

    #[test]
    fn test_failed_bulk_keeps_index_usable() {
        let mut octree = index();
        let result = octree.insert_bulk(vec![PointRecord::new([0.1; 3], 0), PointRecord::new([2.0; 3], 1)]);
        assert!(matches!(result, Err(OctreeError::OutOfBounds { .. })));
        assert!(octree.is_empty());

        octree.insert(PointRecord::new([0.2; 3], 2)).unwrap();
        assert_eq!(octree.count([0.0; 3], [1.0; 3]), 1);
    }
}
