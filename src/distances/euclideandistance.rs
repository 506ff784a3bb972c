use crate::memory::*;

/// Squared euclidean distance between a point and a centroid.
///
/// The square root is never taken: it preserves the ordering the nearest-centroid search relies on.
#[inline(always)]
pub fn distance_sq<T: Primitive>(p: &Point<T>, c: &Centroid<T>) -> T {
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn distance_sq_f32() { distance::<f32>(); }
    #[test] fn distance_sq_f64() { distance::<f64>(); }

    fn distance<T: Primitive>() {
        let p = Point::new(T::lit(1.0), T::lit(2.0));
        assert_eq!(distance_sq(&p, &Centroid::new(T::lit(4.0), T::lit(6.0))), T::lit(25.0));
        assert_eq!(distance_sq(&p, &Centroid::new(T::lit(1.0), T::lit(2.0))), T::zero());
        assert_eq!(distance_sq(&p, &Centroid::new(T::lit(-1.0), T::lit(2.0))), T::lit(4.0));
    }
}
