use ncollide2d::na::{Point2, RealField};

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

pub fn mid_point(a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Orientation of the segment from `a` to `b` measured from the +x axis, in (-pi, pi]
pub fn segment_angle<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Cumulative length along a chain of points, starting at zero on the first point
pub fn cumulative_lengths(points: &[Point2<f64>]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    if points.is_empty() {
        return lengths;
    }

    lengths.push(0.0);
    for w in points.windows(2) {
        let last = lengths.last().copied().unwrap_or(0.0);
        lengths.push(last + dist(&w[0], &w[1]));
    }
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use test_case::test_case;

    #[test_case((0.0, 0.0), (1.0, 0.0), 0.0)]
    #[test_case((0.0, 0.0), (0.0, 1.0), PI / 2.0)]
    #[test_case((1.0, 1.0), (0.0, 1.0), PI)]
    #[test_case((0.0, 1.0), (0.0, 0.0), -PI / 2.0)]
    fn test_segment_angle(a: (f64, f64), b: (f64, f64), e: f64) {
        let r = segment_angle(&Point2::new(a.0, a.1), &Point2::new(b.0, b.1));
        assert_relative_eq!(e, r, epsilon = 1e-12);
    }

    #[test]
    fn test_mid_point() {
        let m = mid_point(&Point2::new(1.0, -2.0), &Point2::new(3.0, 4.0));
        assert_relative_eq!(2.0, m.x, epsilon = 1e-12);
        assert_relative_eq!(1.0, m.y, epsilon = 1e-12);
    }

    #[test]
    fn test_cumulative_lengths() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 6.0),
        ];
        let lengths = cumulative_lengths(&points);
        assert_eq!(vec![0.0, 5.0, 5.0, 7.0], lengths);
    }
}
