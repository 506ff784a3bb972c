//! # kmeans-scaling - API documentation
//!
//! Lloyd's k-means clustering over large, synthetically generated 2D point sets, built to measure how
//! different parallel reduction strategies and worker counts affect the time to convergence.
//!
//! ## Design target
//! The library is a measurement vehicle, so its API-surface is rather plain: points are a flat vector
//! of 2D [`Point`]s carrying their current label, K is fixed by configuration, and the only metric is
//! the squared euclidean distance.
//!
//! ## Accumulation strategies
//! The centroid-update step can accumulate the per-cluster sums in two ways, selected through
//! [`AccumulationStrategy`]:
//! - [`AccumulationStrategy::DirectAtomic`]: every point is added into shared accumulators atomically
//! - [`AccumulationStrategy::LocalMerge`]: every worker sums its share privately and merges once,
//!   inside a critical section
//!
//! Both produce the same centroids, up to floating-point summation order.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_scaling::*;
//!
//! fn main() -> Result<()> {
//!     let config = RunConfig::default()
//!         .with_num_points(50_000)
//!         .with_k(8)
//!         .with_max_iterations(100)
//!         .with_num_threads(2)
//!         .with_strategy(AccumulationStrategy::LocalMerge);
//!
//!     // One engine per run: it owns the worker pool
//!     let kmean = KMeans::new(config)?;
//!     let mut store = kmean.generate::<f64>(1337)?;
//!     let result = kmean.kmeans_lloyd(&mut store, &KMeansHooks::default());
//!
//!     println!("{} after {} iterations", result.status, result.iterations);
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Points per cluster: {:?}", result.centroid_frequency);
//!     Ok(())
//! }
//! ```
//!
//! ## Example (scaling sweep)
//! ```rust
//! use kmeans_scaling::*;
//!
//! let base = RunConfig::default().with_num_points(20_000).with_k(4).with_max_iterations(20);
//! let harness = ScalingHarness::new(base, 2, 42);
//! for sample in harness.run::<f64>(ScalingMode::Weak).unwrap() {
//!     println!("threads={} N={} time={:.4}s", sample.threads, sample.num_points, sample.elapsed.as_secs_f64());
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It validates a [`RunConfig`] and owns the
//! fixed-size worker pool of one run. The data of a run lives in a [`PointStore`], which is mutated in
//! place by the assignment and update passes; the outcome is returned as [`KMeansState`].
//! [`KMeansHooks`] expose per-iteration data (e.g. for a [`RunLog`]) without the engine owning any output.
//! The [`ScalingHarness`] repeats independent runs for strong and weak scaling measurements.

#[macro_use] mod helpers;
mod api;
mod config;
mod convergence;
mod distances;
mod error;
mod inits;
mod memory;
mod runlog;
mod scaling;
mod variants;

pub use api::{IterationReport, KMeans, KMeansHooks, KMeansHooksBuilder, KMeansState};
pub use config::{default_num_threads, RunConfig};
pub use convergence::{ConvergenceController, RunStatus};
pub use distances::{distance_sq, nearest_centroid};
pub use error::{KMeansError, Result};
pub use inits::randomsample::COORDINATE_RANGE;
pub use memory::{Centroid, Point, PointStore, Primitive};
pub use runlog::RunLog;
pub use scaling::{thread_progression, ScalingHarness, ScalingMode, ScalingSample};
pub use variants::{AccumulationStrategy, ClusterSums};
