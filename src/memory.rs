use crate::{inits, KMeansError, Result};
use num::{Float, NumCast};
use rand::distributions::uniform::SampleUniform;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt::{Debug, Display, LowerExp};

pub trait Primitive: Float + NumCast + SampleUniform + Default + Display + Debug + LowerExp
                + Send + Sync + 'static {
    /// Convert an f64 literal / quotient into this primitive.
    #[inline(always)]
    fn lit(v: f64) -> Self {
        <Self as NumCast>::from(v).unwrap_or_else(Self::nan)
    }
    /// Widen into the f64 accumulator domain.
    #[inline(always)]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// A 2D sample together with the cluster it was assigned to in the last assignment pass.
/// **cluster** is `None` only before the first pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T,
    pub cluster: Option<usize>
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y, cluster: None }
    }
}

/// Cluster center. Index `j` in the centroid array always denotes the mean of the points labeled `j`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Centroid<T: Primitive> {
    pub x: T,
    pub y: T
}
impl<T: Primitive> Centroid<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
impl<T: Primitive> From<&Point<T>> for Centroid<T> {
    fn from(p: &Point<T>) -> Self {
        Self { x: p.x, y: p.y }
    }
}


/// Allocate an empty vector able to hold **len** elements, surfacing allocation failure instead of aborting.
pub(crate) fn try_alloc<E>(what: &'static str, len: usize) -> Result<Vec<E>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| KMeansError::Allocation { what, requested: len })?;
    Ok(buf)
}


/// Storage of one clustering run: the mutable point array (coordinates + current label), and the
/// K centroids. Created once per run, mutated in place across iterations and dropped afterwards.
#[derive(Clone, Debug)]
pub struct PointStore<T: Primitive> {
    pub(crate) points: Vec<Point<T>>,
    pub(crate) centroids: Vec<Centroid<T>>
}
impl<T: Primitive> PointStore<T> {
    /// Generate **num_points** uniformly distributed points within `[0, 100]²` from **rng**, and pick
    /// **k** of them (with replacement) as initial centroids.
    pub fn initialize<R: Rng + ?Sized>(num_points: usize, k: usize, rng: &mut R) -> Result<Self> {
        check_sizes(num_points, k)?;
        let points = inits::randomsample::generate_points(num_points, rng)?;
        let centroids = inits::randomsample::sample_centroids(&points, k, rng)?;
        Ok(Self { points, centroids })
    }

    /// Same contract as [`PointStore::initialize`], but the points are generated in parallel (on the
    /// current rayon pool) from per-chunk generators derived from **seed**. The result only depends
    /// on **seed**, never on the amount of workers.
    pub fn initialize_seeded(num_points: usize, k: usize, seed: u64) -> Result<Self> {
        check_sizes(num_points, k)?;
        let mut root = StdRng::seed_from_u64(seed);
        let points = inits::randomsample::generate_points_seeded(num_points, &mut root)?;
        let centroids = inits::randomsample::sample_centroids(&points, k, &mut root)?;
        Ok(Self { points, centroids })
    }

    /// Build a store from precomputed points and centroids.
    pub fn from_parts(points: Vec<Point<T>>, centroids: Vec<Centroid<T>>) -> Result<Self> {
        inits::precomputed::validate(&points, &centroids)?;
        Ok(Self { points, centroids })
    }

    pub fn points(&self) -> &[Point<T>] { &self.points }
    pub fn centroids(&self) -> &[Centroid<T>] { &self.centroids }
    pub fn k(&self) -> usize { self.centroids.len() }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Current label of every point, in point order.
    pub fn assignments(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.points.iter().map(|p| p.cluster)
    }

    /// Amount of points currently labeled with each cluster.
    pub fn cluster_frequencies(&self) -> Vec<usize> {
        let mut frequency = vec![0usize; self.k()];
        self.points.iter().filter_map(|p| p.cluster).for_each(|c| frequency[c] += 1);
        frequency
    }
}

fn check_sizes(num_points: usize, k: usize) -> Result<()> {
    if num_points == 0 {
        return Err(KMeansError::Configuration("num_points must be greater than 0".to_string()));
    }
    if k == 0 {
        return Err(KMeansError::Configuration("k must be greater than 0".to_string()));
    }
    Ok(())
}
