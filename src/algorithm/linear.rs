use crate::algorithm::PointCloud;
use crate::bounds::{BoundingBox, Point};
use crate::error::Result;
use crate::record::PointRecord;

/// A flat list of points answering every query with a full scan.
///
/// No indexing at all: O(n) per query. Used as the reference the octrees are
/// checked and benchmarked against.
#[derive(Clone, Debug)]
pub struct LinearScan<P = ()> {
    records: Vec<PointRecord<P>>,
}

impl<P> Default for LinearScan<P> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<P> LinearScan<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PointRecord<P>] {
        &self.records
    }
}

impl<P> FromIterator<PointRecord<P>> for LinearScan<P> {
    fn from_iter<I: IntoIterator<Item = PointRecord<P>>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<P> PointCloud<P> for LinearScan<P> {
    fn insert(&mut self, record: PointRecord<P>) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn visit<'a, F>(&'a self, min: Point, max: Point, mut visitor: F)
    where
        P: 'a,
        F: FnMut(&'a PointRecord<P>),
    {
        let query = BoundingBox::new(min, max);
        for record in &self.records {
            if query.contains(record.position()) {
                visitor(record);
            }
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
