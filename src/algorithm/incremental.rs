use crate::algorithm::{insert_all, PointCloud};
use crate::bounds::{BoundingBox, Point};
use crate::config::OctreeConfig;
use crate::error::{OctreeError, Result};
use crate::node::{LeafInfo, Node, NodeKind, TreeStats};
use crate::query;
use crate::record::PointRecord;
use tracing::{trace, warn};

/// An octree grown one point at a time.
///
/// Each point is routed down to the leaf whose box contains it. A leaf splits
/// into eight children the moment it holds more than `capacity` points, unless
/// its depth budget is exhausted, in which case it keeps growing.
///
/// Records are stored once in insertion order; leaves hold their positions in
/// that sequence.
pub struct IncrementalOctree<P = ()> {
    config: OctreeConfig,
    records: Vec<PointRecord<P>>,
    root: Node<Vec<usize>>,
}

impl<P> IncrementalOctree<P> {
    /// Creates an empty octree covering `bounds`.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The region accepted by the index. Points outside it are rejected.
    /// * `config` - Maximum depth and leaf capacity. Depths above
    ///   [`OctreeConfig::MAX_DEPTH`] are rejected.
    pub fn new(bounds: BoundingBox, config: OctreeConfig) -> Result<Self> {
        if !bounds.is_valid() {
            return Err(OctreeError::InvalidBounds { min: bounds.min, max: bounds.max });
        }
        config.validate()?;
        Ok(IncrementalOctree {
            config,
            records: Vec::new(),
            root: Node::leaf(bounds, config.max_depth, Vec::new()),
        })
    }

    /// Creates an octree and inserts `records` one by one.
    pub fn from_records(
        bounds: BoundingBox,
        config: OctreeConfig,
        records: impl IntoIterator<Item = PointRecord<P>>,
    ) -> Result<Self> {
        let mut tree = Self::new(bounds, config)?;
        insert_all(&mut tree, records)?;
        Ok(tree)
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.root.bounds
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// All stored records, in insertion order.
    pub fn records(&self) -> &[PointRecord<P>] {
        &self.records
    }

    pub fn stats(&self) -> TreeStats {
        self.root.stats()
    }

    pub fn leaves(&self) -> Vec<LeafInfo> {
        self.root.leaves()
    }

    pub fn leaf_contents(&self) -> Vec<(LeafInfo, Vec<&PointRecord<P>>)> {
        self.root.leaf_contents(&self.records)
    }
}

impl<P> PointCloud<P> for IncrementalOctree<P> {
    fn insert(&mut self, record: PointRecord<P>) -> Result<()> {
        if let Err(err) = record.validate(&self.root.bounds) {
            warn!(%err, "rejecting point");
            return Err(err);
        }
        let slot = self.records.len();
        self.records.push(record);
        insert_slot(&mut self.root, &self.records, slot, self.config.capacity);
        Ok(())
    }

    fn visit<'a, F>(&'a self, min: Point, max: Point, mut visitor: F)
    where
        P: 'a,
        F: FnMut(&'a PointRecord<P>),
    {
        query::visit(&self.root, &self.records, &BoundingBox::new(min, max), &mut visitor);
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

fn insert_slot<P>(node: &mut Node<Vec<usize>>, records: &[PointRecord<P>], slot: usize, capacity: usize) {
    match &mut node.kind {
        NodeKind::Internal(children) => {
            let code = node.bounds.octant_of(records[slot].position());
            insert_slot(&mut children[code], records, slot, capacity);
        }
        NodeKind::Leaf(bucket) => {
            bucket.push(slot);
            if bucket.len() > capacity && node.depth_remaining > 0 {
                split(node, records, capacity);
            }
        }
    }
}

/// Turns an overflowing leaf into an internal node and re-routes its points.
///
/// A child that overflows in turn splits again under the same rule.
fn split<P>(node: &mut Node<Vec<usize>>, records: &[PointRecord<P>], capacity: usize) {
    let NodeKind::Leaf(bucket) = std::mem::replace(&mut node.kind, NodeKind::Leaf(Vec::new())) else {
        return;
    };
    trace!(points = bucket.len(), depth_remaining = node.depth_remaining, "splitting leaf");

    let mut children = node.split_children(|_| Vec::new());
    for slot in bucket {
        let code = node.bounds.octant_of(records[slot].position());
        insert_slot(&mut children[code], records, slot, capacity);
    }
    node.kind = NodeKind::Internal(children);
}
