use crate::algorithm::PointCloud;
use crate::bounds::{BoundingBox, Point};
use crate::config::OctreeConfig;
use crate::octree::Octree;
use crate::record::PointRecord;
use crate::sample::random_records;
use js_sys::Array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// --- Bounding Box ---

/// Represents an axis-aligned bounding box in 3D space.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> BoundingBox3D {
        BoundingBox3D {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }
}

impl From<BoundingBox3D> for BoundingBox {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

// --- Octree ---

/// WASM wrapper around [`Octree`].
///
/// Every point is identified by the order in which it was added, starting at 0.
/// Queries return these ids.
#[wasm_bindgen(js_name = Octree)]
pub struct OctreeWASM {
    inner: Octree<u32>,
}

#[wasm_bindgen(js_class = Octree)]
impl OctreeWASM {
    /// Creates an empty octree.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The region covered by the index.
    /// * `max_depth` - Number of subdivision levels below the root.
    /// * `capacity` - The maximum number of points in a leaf before it is split.
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox3D, max_depth: u32, capacity: usize) -> Result<OctreeWASM, JsError> {
        let inner = Octree::new(bounds.into(), OctreeConfig::new(max_depth, capacity))?;
        Ok(OctreeWASM { inner })
    }

    /// Number of points in the index.
    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize {
        self.inner.len()
    }

    /// Whether the index was filled with `set_points`.
    #[wasm_bindgen(getter)]
    pub fn is_bulk(&self) -> bool {
        self.inner.is_bulk()
    }

    /// Adds a point and returns its id.
    pub fn insert(&mut self, x: f64, y: f64, z: f64) -> Result<u32, JsError> {
        let id = self.next_id(0)?;
        self.inner.insert(PointRecord::new([x, y, z], id))?;
        Ok(id)
    }

    /// Adds a point given as a `[x, y, z]` array and returns its id.
    pub fn insert_point(&mut self, point: &JsValue) -> Result<u32, JsError> {
        let [x, y, z] = parse_js_point(point).ok_or_else(|| JsError::new("expected an array [x, y, z]"))?;
        self.insert(x, y, z)
    }

    /// Bulk loads an empty index from a flat array `[x, y, z, x, y, z, ...]`.
    pub fn set_points(&mut self, points: &[f64]) -> Result<(), JsError> {
        self.next_id(points.len() / 3)?;
        let records = flat_records(points)
            .ok_or_else(|| JsError::new("point array length must be a multiple of 3"))?;
        self.inner.insert_bulk(records)?;
        Ok(())
    }

    /// Bulk loads an empty index with `count` uniformly distributed points.
    pub fn random_points(&mut self, count: usize, seed: u64) -> Result<(), JsError> {
        self.next_id(count)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = *self.inner.bounds();
        let records = random_records(&mut rng, &bounds, count)
            .into_iter()
            .zip(0u32..)
            .map(|(record, id)| PointRecord::new(*record.position(), id));
        self.inner.insert_bulk(records)?;
        Ok(())
    }

    /// Returns a flat array of all point coordinates ordered by id.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.inner.len() * 3];
        for record in self.inner.records() {
            let offset = *record.data() as usize * 3;
            out[offset..offset + 3].copy_from_slice(record.position());
        }
        out
    }

    /// Returns the ids of all points inside the closed box.
    pub fn select(&self, query: BoundingBox3D) -> Vec<u32> {
        let query: BoundingBox = query.into();
        let mut ids = Vec::new();
        self.inner.visit(query.min, query.max, |record| ids.push(*record.data()));
        ids
    }

    /// Returns the number of points inside the closed box.
    pub fn count(&self, query: BoundingBox3D) -> usize {
        let query: BoundingBox = query.into();
        self.inner.count(query.min, query.max)
    }
}

impl OctreeWASM {
    /// The id the next point gets, making sure `extra` more ids still fit in a `u32`.
    fn next_id(&self, extra: usize) -> Result<u32, JsError> {
        let len = self.inner.len();
        u32::try_from(len + extra)
            .map(|_| len as u32)
            .map_err(|_| JsError::new("too many points"))
    }
}

fn parse_js_point(val: &JsValue) -> Option<Point> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < 3 {
        return None;
    }
    let mut point = [0.0; 3];
    for (i, coord) in point.iter_mut().enumerate() {
        *coord = arr.get(i as u32).as_f64()?;
    }
    Some(point)
}

/// Splits `[x, y, z, x, y, z, ...]` into records numbered in order.
/// Returns `None` if the length is not a multiple of 3.
fn flat_records(points: &[f64]) -> Option<Vec<PointRecord<u32>>> {
    if points.len() % 3 != 0 {
        return None;
    }
    Some(
        points
            .chunks_exact(3)
            .zip(0u32..)
            .map(|(c, id)| PointRecord::new([c[0], c[1], c[2]], id))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> BoundingBox3D {
        BoundingBox3D::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }

    fn octree(max_depth: u32, capacity: usize) -> OctreeWASM {
        match OctreeWASM::new(unit(), max_depth, capacity) {
            Ok(octree) => octree,
            Err(_) => panic!("Failed to create octree"),
        }
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut octree = octree(4, 2);
        assert_eq!(octree.insert(0.1, 0.1, 0.1).ok(), Some(0));
        assert_eq!(octree.insert(0.9, 0.9, 0.9).ok(), Some(1));
        assert_eq!(octree.insert(0.2, 0.8, 0.2).ok(), Some(2));

        let mut ids = octree.select(BoundingBox3D::new(0.0, 0.0, 0.0, 0.5, 1.0, 0.5));
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(octree.points(), vec![0.1, 0.1, 0.1, 0.9, 0.9, 0.9, 0.2, 0.8, 0.2]);
    }

    #[test]
    fn test_set_points_keeps_ids() {
        let mut octree = octree(4, 1);
        let points = vec![0.9, 0.9, 0.9, 0.1, 0.1, 0.1, 0.6, 0.6, 0.6];
        assert!(octree.set_points(&points).is_ok());

        assert!(octree.is_bulk());
        assert_eq!(octree.count_points(), 3);
        assert_eq!(octree.points(), points);
        assert_eq!(octree.select(BoundingBox3D::new(0.0, 0.0, 0.0, 0.2, 0.2, 0.2)), vec![1]);
    }

    #[test]
    fn test_ragged_point_array_is_refused() {
        assert!(flat_records(&[0.1, 0.2, 0.3, 0.4]).is_none());
        assert!(flat_records(&[0.1, 0.2]).is_none());
        assert_eq!(flat_records(&[]).map(|records| records.len()), Some(0));

        let records = flat_records(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert_eq!(records[1].position(), &[0.4, 0.5, 0.6]);
        assert_eq!(*records[1].data(), 1);
    }

    #[test]
    fn test_random_points_fill_bounds() {
        let mut octree = octree(6, 8);
        assert!(octree.random_points(1000, 42).is_ok());
        assert_eq!(octree.count(unit()), 1000);
    }
}
