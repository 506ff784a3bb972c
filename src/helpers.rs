/// Minimum amount of items a rayon task should process, so that a parallel iterator over **len**
/// items is split into about one packet per worker (rayon does not offer static scheduling).
pub(crate) fn work_packet_size(len: usize, workers: usize) -> usize {
    div_roundup(len, workers.max(1)).max(1)
}

pub(crate) fn div_roundup(val: usize, divisor: usize) -> usize {
    val / divisor + usize::from(val % divisor != 0)
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $rel_tol: expr) => ({
		match ($left, $right, $rel_tol) {
			(left_val, right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				let scale = left_val.abs().max(right_val.abs()).max(1.0);
				if !(delta <= tol_val * scale) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed relative ∆={:e})",
						left_val, right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-9))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{Centroid, Point, PointStore, Primitive};

	/// The two well separated triangles used by several scenarios.
	pub fn two_triangles() -> PointStore<f64> {
		let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (10.0, 10.0), (10.0, 11.0), (11.0, 10.0)]
			.iter().map(|&(x, y)| Point::new(x, y)).collect();
		PointStore::from_parts(points, vec![Centroid::new(0.0, 0.0), Centroid::new(10.0, 10.0)]).unwrap()
	}

	pub fn assert_centroids_approx_eq<T: Primitive>(should: &[Centroid<T>], actual: &[Centroid<T>], rel_tol: f64) {
		assert_eq!(should.len(), actual.len());
		for (s, a) in should.iter().zip(actual.iter()) {
			assert_approx_eq!(s.x.as_f64(), a.x.as_f64(), rel_tol);
			assert_approx_eq!(s.y.as_f64(), a.y.as_f64(), rel_tol);
		}
	}
}


#[cfg(test)]
mod tests {
	#[test]
	fn div_roundup() {
		for d in 1..20 {
			assert_eq!(super::div_roundup(0, d), 0);
			for v in 1..=d {
				assert_eq!(super::div_roundup(v, d), 1);
			}
			for v in d+1..=2*d {
				assert_eq!(super::div_roundup(v, d), 2);
			}
		}
	}

	#[test]
	fn work_packet_size() {
		assert_eq!(super::work_packet_size(100, 4), 25);
		assert_eq!(super::work_packet_size(101, 4), 26);
		assert_eq!(super::work_packet_size(3, 8), 1);
		assert_eq!(super::work_packet_size(0, 8), 1);
		assert_eq!(super::work_packet_size(10, 0), 10);
	}
}
