use crate::bounds::BoundingBox;
use crate::node::{Bucket, Node, NodeKind};
use crate::record::PointRecord;

/// Visits every record under `node` that lies inside the closed box `query`.
///
/// Subtrees disjoint from the query are skipped, subtrees strictly inside it
/// are emitted without testing individual points.
pub(crate) fn visit<'a, B, P, F>(node: &Node<B>, records: &'a [PointRecord<P>], query: &BoundingBox, visitor: &mut F)
where
    B: Bucket,
    F: FnMut(&'a PointRecord<P>),
{
    if node.bounds.strictly_inside(query) {
        emit_all(node, records, visitor);
        return;
    }
    if !node.bounds.intersects(query) {
        return;
    }

    match &node.kind {
        NodeKind::Leaf(bucket) => {
            for slot in bucket.slots() {
                let record = &records[slot];
                if query.contains(record.position()) {
                    visitor(record);
                }
            }
        }
        NodeKind::Internal(children) => {
            for child in children.iter() {
                visit(child, records, query, visitor);
            }
        }
    }
}

fn emit_all<'a, B, P, F>(node: &Node<B>, records: &'a [PointRecord<P>], visitor: &mut F)
where
    B: Bucket,
    F: FnMut(&'a PointRecord<P>),
{
    node.for_each_leaf(0, &mut |_, _, bucket: &B| {
        for slot in bucket.slots() {
            visitor(&records[slot]);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PointRecord<usize>> {
        vec![
            PointRecord::new([0.1, 0.1, 0.1], 0),
            PointRecord::new([0.9, 0.9, 0.9], 1),
            PointRecord::new([0.5, 0.5, 0.5], 2),
            PointRecord::new([0.2, 0.8, 0.4], 3),
        ]
    }

    fn collect(node: &Node<Vec<usize>>, records: &[PointRecord<usize>], query: BoundingBox) -> Vec<usize> {
        let mut out = Vec::new();
        visit(node, records, &query, &mut |r: &PointRecord<usize>| out.push(*r.data()));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_leaf_filters_inclusively() {
        let records = records();
        let node = Node::leaf(BoundingBox::new([0.0; 3], [1.0; 3]), 0, vec![0, 1, 2, 3]);

        assert_eq!(collect(&node, &records, BoundingBox::new([0.5; 3], [1.0; 3])), vec![1, 2]);
        assert_eq!(collect(&node, &records, BoundingBox::new([0.5; 3], [0.5; 3])), vec![2]);
    }

    #[test]
    fn test_containing_query_returns_everything() {
        let records = records();
        let node = Node::leaf(BoundingBox::new([0.0; 3], [1.0; 3]), 0, vec![0, 1, 2, 3]);
        assert_eq!(collect(&node, &records, BoundingBox::new([-1.0; 3], [2.0; 3])), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disjoint_and_malformed_queries_are_empty() {
        let records = records();
        let node = Node::leaf(BoundingBox::new([0.0; 3], [1.0; 3]), 0, vec![0, 1, 2, 3]);

        assert!(collect(&node, &records, BoundingBox::new([2.0; 3], [3.0; 3])).is_empty());
        assert!(collect(&node, &records, BoundingBox::new([0.9; 3], [0.1; 3])).is_empty());
    }
}
