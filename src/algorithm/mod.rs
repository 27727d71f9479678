use crate::bounds::{BoundingBox, Point};
use crate::error::Result;
use crate::record::PointRecord;
use rayon::prelude::*;

pub mod bulk;
pub mod incremental;
pub mod linear;

/// Trait defining a collection of points that answers box queries.
/// This allows swapping between the incremental octree, the bulk-built octree
/// and the brute-force linear scan.
pub trait PointCloud<P> {
    /// Adds a single record.
    fn insert(&mut self, record: PointRecord<P>) -> Result<()>;

    /// Calls `visitor` for every stored record inside the closed box `[min, max]`.
    ///
    /// The visiting order is unspecified.
    fn visit<'a, F>(&'a self, min: Point, max: Point, visitor: F)
    where
        P: 'a,
        F: FnMut(&'a PointRecord<P>);

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects every stored record inside the closed box `[min, max]`.
    ///
    /// A box with `min > max` on some axis selects nothing.
    fn select(&self, min: Point, max: Point) -> Vec<&PointRecord<P>> {
        let mut out = Vec::new();
        self.visit(min, max, |record| out.push(record));
        out
    }

    /// Counts the records inside the closed box `[min, max]`.
    fn count(&self, min: Point, max: Point) -> usize {
        let mut count = 0;
        self.visit(min, max, |_| count += 1);
        count
    }

    /// Runs independent queries in parallel, one result per query box.
    fn select_many(&self, queries: &[BoundingBox]) -> Vec<Vec<&PointRecord<P>>>
    where
        Self: Sync,
        P: Sync,
    {
        queries
            .par_iter()
            .map(|query| self.select(query.min, query.max))
            .collect()
    }
}

pub(crate) fn insert_all<P, C: PointCloud<P> + ?Sized>(
    cloud: &mut C,
    records: impl IntoIterator<Item = PointRecord<P>>,
) -> Result<()> {
    for record in records {
        cloud.insert(record)?;
    }
    Ok(())
}
