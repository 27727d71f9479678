use octocloud::sample::{random_query, random_records};
use octocloud::{BoundingBox, Octree, OctreeConfig, PointCloud};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=octocloud=debug shows build summaries.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let config = OctreeConfig::new(8, 256);
    let mut rng = StdRng::seed_from_u64(1);

    // A million points is enough to get a stable profile of both builds
    let records = random_records(&mut rng, &bounds, 1_000_000);
    let queries: Vec<BoundingBox> = (0..1000).map(|_| random_query(&mut rng, &bounds, 0.1)).collect();

    let start = Instant::now();
    let mut incremental = Octree::new(bounds, config).expect("valid bounds");
    for record in records.iter().cloned() {
        incremental.insert(record).expect("point inside bounds");
    }
    println!("incremental build: {:?} ({:?})", start.elapsed(), incremental.stats());

    let start = Instant::now();
    let mut bulk = Octree::new(bounds, config).expect("valid bounds");
    bulk.insert_bulk(records).expect("points inside bounds");
    println!("bulk build:        {:?} ({:?})", start.elapsed(), bulk.stats());

    for (name, octree) in [("incremental", &incremental), ("bulk", &bulk)] {
        let start = Instant::now();
        let found: usize = queries.iter().map(|q| octree.count(q.min, q.max)).sum();
        println!("{name} select: {:?} for {} queries, {found} points", start.elapsed(), queries.len());
    }
}
