use crate::bounds::{BoundingBox, OCTANTS};
use crate::record::PointRecord;
use std::ops::Range;

/// Storage of a leaf: which slots of the backing record sequence it holds.
///
/// The incremental engine keeps a list of slots per leaf, the bulk engine a
/// contiguous range of the reordered sequence.
pub(crate) trait Bucket {
    fn len(&self) -> usize;
    fn slots(&self) -> impl Iterator<Item = usize> + '_;
}

impl Bucket for Vec<usize> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().copied()
    }
}

impl Bucket for Range<usize> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.clone()
    }
}

pub(crate) enum NodeKind<B> {
    Leaf(B),
    Internal(Box<[Node<B>; OCTANTS]>),
}

/// A box of space that either holds points directly or owns eight children.
pub(crate) struct Node<B> {
    pub(crate) bounds: BoundingBox,
    pub(crate) depth_remaining: u32,
    pub(crate) kind: NodeKind<B>,
}

impl<B> Node<B> {
    pub(crate) fn leaf(bounds: BoundingBox, depth_remaining: u32, bucket: B) -> Self {
        Node { bounds, depth_remaining, kind: NodeKind::Leaf(bucket) }
    }

    /// Builds the eight children of this node's box, one level deeper.
    ///
    /// Pure geometry: `bucket` supplies the storage for each child by octant code.
    pub(crate) fn split_children(&self, mut bucket: impl FnMut(usize) -> B) -> Box<[Node<B>; OCTANTS]> {
        let depth = self.depth_remaining.saturating_sub(1);
        let boxes = self.bounds.octants();
        Box::new(std::array::from_fn(|code| Node::leaf(boxes[code], depth, bucket(code))))
    }
}

impl<B: Bucket> Node<B> {
    /// Calls `f` for every leaf with its depth below the root.
    pub(crate) fn for_each_leaf<F: FnMut(&BoundingBox, u32, &B)>(&self, depth: u32, f: &mut F) {
        match &self.kind {
            NodeKind::Leaf(bucket) => f(&self.bounds, depth, bucket),
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.for_each_leaf(depth + 1, f);
                }
            }
        }
    }

    pub(crate) fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.collect_stats(0, &mut stats);
        stats
    }

    fn collect_stats(&self, depth: u32, stats: &mut TreeStats) {
        stats.nodes += 1;
        match &self.kind {
            NodeKind::Leaf(bucket) => {
                stats.leaves += 1;
                stats.points += bucket.len();
                stats.deepest_leaf = stats.deepest_leaf.max(depth);
                stats.largest_leaf = stats.largest_leaf.max(bucket.len());
            }
            NodeKind::Internal(children) => {
                for child in children.iter() {
                    child.collect_stats(depth + 1, stats);
                }
            }
        }
    }

    pub(crate) fn leaves(&self) -> Vec<LeafInfo> {
        let mut out = Vec::new();
        self.for_each_leaf(0, &mut |bounds, depth, bucket: &B| {
            out.push(LeafInfo { bounds: *bounds, depth, len: bucket.len() });
        });
        out
    }

    /// Every leaf together with the records it stores.
    pub(crate) fn leaf_contents<'a, P>(&self, records: &'a [PointRecord<P>]) -> Vec<(LeafInfo, Vec<&'a PointRecord<P>>)> {
        let mut out = Vec::new();
        self.for_each_leaf(0, &mut |bounds, depth, bucket: &B| {
            let info = LeafInfo { bounds: *bounds, depth, len: bucket.len() };
            out.push((info, bucket.slots().map(|slot| &records[slot]).collect()));
        });
        out
    }
}

/// Shape summary of an octree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Leaves plus internal nodes.
    pub nodes: usize,
    pub leaves: usize,
    /// Points stored across all leaves.
    pub points: usize,
    /// Depth of the deepest leaf, the root being depth 0.
    pub deepest_leaf: u32,
    /// Occupancy of the fullest leaf.
    pub largest_leaf: usize,
}

/// Description of one leaf of an octree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafInfo {
    pub bounds: BoundingBox,
    pub depth: u32,
    pub len: usize,
}
