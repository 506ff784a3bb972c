use crate::memory::*;
use crate::{helpers, Result};
use rand::distributions::Uniform;
use rand::prelude::*;
use rayon::prelude::*;

/// Points per independently seeded generation chunk.
pub(crate) const GENERATION_CHUNK: usize = 1 << 16;

/// Upper bound of both coordinate axes. Coordinates are drawn from `[0, COORDINATE_RANGE]`.
pub const COORDINATE_RANGE: f64 = 100.0;

fn coordinate_distribution<T: Primitive>() -> Uniform<T> {
    Uniform::new_inclusive(T::zero(), T::lit(COORDINATE_RANGE))
}

pub(crate) fn generate_points<T, R>(num_points: usize, rng: &mut R) -> Result<Vec<Point<T>>>
            where T: Primitive, R: Rng + ?Sized {
    let dist = coordinate_distribution::<T>();
    let mut points = try_alloc("points", num_points)?;
    points.extend((0..num_points).map(|_| {
        let x = rng.sample(&dist);
        let y = rng.sample(&dist);
        Point::new(x, y)
    }));
    Ok(points)
}

/// Every chunk is filled from its own generator, seeded with the next value drawn from **root**, so
/// workers never share a generator and the outcome does not depend on how chunks are scheduled.
pub(crate) fn generate_points_seeded<T, R>(num_points: usize, root: &mut R) -> Result<Vec<Point<T>>>
            where T: Primitive, R: Rng + ?Sized {
    let mut points = try_alloc("points", num_points)?;
    let chunk_seeds: Vec<u64> = (0..helpers::div_roundup(num_points, GENERATION_CHUNK))
        .map(|_| root.gen())
        .collect();
    points.resize(num_points, Point::default());
    points.par_chunks_mut(GENERATION_CHUNK)
        .zip(chunk_seeds.par_iter())
        .for_each(|(chunk, &chunk_seed)| {
            let dist = coordinate_distribution::<T>();
            let mut rnd = StdRng::seed_from_u64(chunk_seed);
            chunk.iter_mut().for_each(|p| {
                p.x = rnd.sample(&dist);
                p.y = rnd.sample(&dist);
                p.cluster = None;
            });
        });
    Ok(points)
}

/// Random sample initialization (a.k.a. Forgy), drawing **k** point indices independently.
/// Indices may repeat, which yields duplicate initial centroids.
pub(crate) fn sample_centroids<T, R>(points: &[Point<T>], k: usize, rng: &mut R) -> Result<Vec<Centroid<T>>>
            where T: Primitive, R: Rng + ?Sized {
    let mut centroids = try_alloc("centroids", k)?;
    centroids.extend((0..k).map(|_| Centroid::from(&points[rng.gen_range(0, points.len())])));
    Ok(centroids)
}
