use crate::algorithm::PointCloud;
use crate::bounds::{below_mid, BoundingBox, Point, OCTANTS};
use crate::config::OctreeConfig;
use crate::error::{OctreeError, Result};
use crate::node::{LeafInfo, Node, NodeKind, TreeStats};
use crate::query;
use crate::record::PointRecord;
use std::ops::Range;
use tracing::{debug, warn};

/// An octree built in one pass over a complete point set.
///
/// The records live in a single sequence that is reordered in place while the
/// tree is built: every node covers a contiguous range of it, and the eight
/// children of a node cover eight consecutive sub-ranges in octant order.
/// No per-node storage is allocated and the tree is read-only once built.
pub struct BulkOctree<P = ()> {
    config: OctreeConfig,
    records: Vec<PointRecord<P>>,
    root: Node<Range<usize>>,
}

impl<P> BulkOctree<P> {
    /// Builds an octree over `records`.
    ///
    /// Fails without building anything if the bounds are invalid, the depth
    /// exceeds [`OctreeConfig::MAX_DEPTH`], or any record lies outside the bounds.
    pub fn build(bounds: BoundingBox, mut records: Vec<PointRecord<P>>, config: OctreeConfig) -> Result<Self> {
        if !bounds.is_valid() {
            return Err(OctreeError::InvalidBounds { min: bounds.min, max: bounds.max });
        }
        config.validate()?;
        for record in &records {
            if let Err(err) = record.validate(&bounds) {
                warn!(%err, "rejecting bulk load");
                return Err(err);
            }
        }

        let mut root = Node::leaf(bounds, config.max_depth, 0..records.len());
        subdivide(&mut root, &mut records, config.capacity);

        let tree = BulkOctree { config, records, root };
        debug!(stats = ?tree.stats(), "bulk build finished");
        Ok(tree)
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.root.bounds
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// All stored records, in the order produced by partitioning.
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

impl<P> PointCloud<P> for BulkOctree<P> {
    /// A bulk-built tree never changes; this always fails with [`OctreeError::Sealed`].
    fn insert(&mut self, _record: PointRecord<P>) -> Result<()> {
        Err(OctreeError::Sealed)
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

fn subdivide<P>(node: &mut Node<Range<usize>>, records: &mut [PointRecord<P>], capacity: usize) {
    let range = match &node.kind {
        NodeKind::Leaf(range) => range.clone(),
        NodeKind::Internal(_) => return,
    };
    if range.len() <= capacity || node.depth_remaining == 0 {
        return;
    }

    let cuts = octant_cuts(&mut records[range.clone()], &node.bounds.mid());
    let start = range.start;
    let mut children = node.split_children(|code| start + cuts[code]..start + cuts[code + 1]);
    for child in children.iter_mut() {
        subdivide(child, records, capacity);
    }
    node.kind = NodeKind::Internal(children);
}

/// Reorders `records` into the eight octants around `mid`.
///
/// Returns nine offsets: octant `i` occupies `cuts[i]..cuts[i + 1]`. Z is split
/// first, then Y within each half, then X within each quadrant, so that the
/// sub-range order equals the octant code order (bit 0 = X, bit 1 = Y, bit 2 = Z).
fn octant_cuts<P>(records: &mut [PointRecord<P>], mid: &Point) -> [usize; OCTANTS + 1] {
    let mut cuts = [0; OCTANTS + 1];
    cuts[OCTANTS] = records.len();

    cuts[4] = partition(records, 2, mid[2]);
    for half in [0, 4] {
        let (lo, hi) = (cuts[half], cuts[half + 4]);
        cuts[half + 2] = lo + partition(&mut records[lo..hi], 1, mid[1]);
    }
    for quarter in [0, 2, 4, 6] {
        let (lo, hi) = (cuts[quarter], cuts[quarter + 2]);
        cuts[quarter + 1] = lo + partition(&mut records[lo..hi], 0, mid[0]);
    }
    cuts
}

/// Moves every record whose coordinate on `axis` is below `pivot` in front of
/// the others, scanning from both ends. Returns the size of the lower part.
fn partition<P>(records: &mut [PointRecord<P>], axis: usize, pivot: f64) -> usize {
    let mut left = 0;
    let mut right = records.len();
    loop {
        while left < right && below_mid(records[left].position()[axis], pivot) {
            left += 1;
        }
        while left < right && !below_mid(records[right - 1].position()[axis], pivot) {
            right -= 1;
        }
        if left >= right {
            return left;
        }
        records.swap(left, right - 1);
        left += 1;
        right -= 1;
    }
}
