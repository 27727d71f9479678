use octocloud::sample::random_records;
use octocloud::{BoundingBox, BulkOctree, IncrementalOctree, LeafInfo, OctreeConfig, PointCloud, PointRecord, TreeStats};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn unit() -> BoundingBox {
    BoundingBox::new([0.0; 3], [1.0; 3])
}

/// Leaves with their payloads sorted, for comparing trees built in different ways.
fn leaf_ids(contents: Vec<(LeafInfo, Vec<&PointRecord<usize>>)>) -> Vec<(LeafInfo, Vec<usize>)> {
    contents
        .into_iter()
        .map(|(info, records)| {
            let mut ids: Vec<usize> = records.into_iter().map(|r| *r.data()).collect();
            ids.sort_unstable();
            (info, ids)
        })
        .collect()
}

fn assert_well_formed(contents: &[(LeafInfo, Vec<&PointRecord<usize>>)], config: &OctreeConfig, total: usize) {
    let mut stored = 0;
    for (leaf, records) in contents {
        assert_eq!(leaf.len, records.len());
        assert!(leaf.depth <= config.max_depth, "Leaf at depth {} exceeds the maximum", leaf.depth);
        if leaf.len > config.capacity {
            assert_eq!(leaf.depth, config.max_depth, "Overfull leaf {:?} should have been split", leaf);
        }
        for record in records {
            assert!(
                leaf.bounds.contains(record.position()),
                "Point {:?} stored outside its leaf {:?}",
                record.position(),
                leaf.bounds
            );
        }
        stored += leaf.len;
    }
    assert_eq!(stored, total, "Points lost or duplicated across leaves");
}

macro_rules! structure_tests {
    ($test_name:ident, $config:expr, $n:expr, $seed:expr) => {
        #[test]
        fn $test_name() {
            let config: OctreeConfig = $config;
            let records = random_records(&mut StdRng::seed_from_u64($seed), &unit(), $n);

            let incremental = IncrementalOctree::from_records(unit(), config, records.clone()).unwrap();
            let bulk = BulkOctree::build(unit(), records, config).unwrap();

            assert_well_formed(&incremental.leaf_contents(), &config, $n);
            assert_well_formed(&bulk.leaf_contents(), &config, $n);

            assert_eq!(incremental.select(unit().min, unit().max).len(), $n);
            assert_eq!(bulk.select(unit().min, unit().max).len(), $n);

            // A leaf splits exactly when its subtree holds more than `capacity`
            // points, whichever way the tree is built.
            assert_eq!(incremental.stats(), bulk.stats());
            assert_eq!(leaf_ids(incremental.leaf_contents()), leaf_ids(bulk.leaf_contents()));
        }
    };
}

structure_tests!(test_structure_shallow, OctreeConfig::new(2, 4), 500, 10);
structure_tests!(test_structure_default, OctreeConfig::default(), 5000, 11);
structure_tests!(test_structure_fine, OctreeConfig::new(6, 1), 1000, 12);
structure_tests!(test_structure_no_depth, OctreeConfig::new(0, 4), 100, 13);
structure_tests!(test_structure_zero_capacity, OctreeConfig::new(3, 0), 50, 14);
structure_tests!(test_structure_empty, OctreeConfig::new(4, 4), 0, 15);

#[test]
fn test_depth_ceiling_with_duplicates() {
    let config = OctreeConfig::new(3, 2);
    let mut tree = IncrementalOctree::new(unit(), config).unwrap();
    for i in 0..50 {
        tree.insert(PointRecord::new([0.1, 0.2, 0.3], i)).unwrap();
    }

    let stats = tree.stats();
    assert_eq!(stats.deepest_leaf, 3);
    assert_eq!(stats.largest_leaf, 50);
    assert_eq!(stats.points, 50);
    // One split per level along the path to the duplicates.
    assert_eq!(stats.nodes, 1 + 3 * 8);

    let full: Vec<_> = tree.leaves().into_iter().filter(|leaf| leaf.len > 0).collect();
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].depth, 3);
}

#[test]
fn test_boundary_points_go_to_upper_octants() {
    let records: Vec<PointRecord<usize>> = [[0.5, 0.5, 0.5], [0.5, 0.25, 0.25], [0.25, 0.5, 0.25], [0.25, 0.25, 0.5], [1.0, 1.0, 1.0]]
        .into_iter()
        .enumerate()
        .map(|(i, p)| PointRecord::new(p, i))
        .collect();
    let config = OctreeConfig::new(1, 1);

    let incremental = IncrementalOctree::from_records(unit(), config, records.clone()).unwrap();
    let bulk = BulkOctree::build(unit(), records, config).unwrap();

    for contents in [leaf_ids(incremental.leaf_contents()), leaf_ids(bulk.leaf_contents())] {
        assert_eq!(contents.len(), 8);
        assert_eq!(contents[7].1, vec![0, 4]);
        assert_eq!(contents[1].1, vec![1]);
        assert_eq!(contents[2].1, vec![2]);
        assert_eq!(contents[4].1, vec![3]);
        for code in [0, 3, 5, 6] {
            assert!(contents[code].1.is_empty(), "Octant {} should be empty", code);
        }
    }
}

#[test]
fn test_stats_of_empty_tree() {
    let tree = IncrementalOctree::<usize>::new(unit(), OctreeConfig::default()).unwrap();
    assert_eq!(tree.stats(), TreeStats { nodes: 1, leaves: 1, points: 0, deepest_leaf: 0, largest_leaf: 0 });
    assert!(tree.select([0.0; 3], [1.0; 3]).is_empty());
}
