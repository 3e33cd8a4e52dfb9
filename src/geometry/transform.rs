use crate::algorithms::{lerp, preceding_index_search};
use crate::errors::{Result, SectionError};
use ncollide2d::na::{Point2, Rotation2};
use serde::{Deserialize, Serialize};

/// Slack applied to the cut coordinate so the inserted cut point survives the filter on either
/// side.
pub const CLIP_TOL: f64 = 1e-12;

/// Which part of a curve to keep when clipping at a given x, in terms of increasing x.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipSide {
    /// Keep `x <= x_cut`
    Left,
    /// Keep `x >= x_cut`
    Right,
}

/// Rotates the points about a pivot by `-alpha_deg`, so a positive angle turns the curve
/// clockwise (nose up for a profile pivoting ahead of its trailing edge).
pub fn rotate_about(points: &[Point2<f64>], alpha_deg: f64, pivot: &Point2<f64>) -> Vec<Point2<f64>> {
    let rotation = Rotation2::new(-alpha_deg.to_radians());
    points.iter().map(|p| pivot + rotation * (p - pivot)).collect()
}

/// Stable sort by x, then drop samples whose x repeats an earlier one.
fn sorted_unique_x(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    sorted.dedup_by(|later, earlier| later.x == earlier.x);
    sorted
}

/// Linearly interpolates the y value of a curve at `x`. The curve is treated as an unordered set
/// of samples. Both ends of the x extent are valid queries; anything outside it is an error.
pub fn interpolate_at_x(points: &[Point2<f64>], x: f64) -> Result<f64> {
    let samples = sorted_unique_x(points);
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(SectionError::NotEnoughPoints),
    };

    if !(x >= first.x && x <= last.x) {
        return Err(SectionError::OutOfRangeQuery {
            x,
            min: first.x,
            max: last.x,
        });
    }

    let xs: Vec<f64> = samples.iter().map(|p| p.x).collect();
    let i = preceding_index_search(&xs, x);
    match samples.get(i + 1) {
        Some(next) => Ok(lerp(samples[i].x, samples[i].y, next.x, next.y, x)),
        None => Ok(samples[i].y),
    }
}

/// Inserts the interpolated point at `x_cut` into the samples, sorts them by x and keeps the
/// requested side. The cut point itself is always retained so that adjoining chains share it.
pub fn clip_at_x(points: &[Point2<f64>], x_cut: f64, side: ClipSide) -> Result<Vec<Point2<f64>>> {
    let y_cut = interpolate_at_x(points, x_cut)?;

    let mut augmented = points.to_vec();
    augmented.push(Point2::new(x_cut, y_cut));
    augmented.sort_by(|a, b| a.x.total_cmp(&b.x));

    Ok(augmented
        .into_iter()
        .filter(|p| match side {
            ClipSide::Left => p.x <= x_cut + CLIP_TOL,
            ClipSide::Right => p.x >= x_cut - CLIP_TOL,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn sample_curve() -> Vec<Point2<f64>> {
        // Deliberately out of order
        vec![
            Point2::new(2.0, 4.0),
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 2.0),
        ]
    }

    #[test]
    fn test_rotate_quarter_turn_about_pivot() {
        let pivot = Point2::new(1.0, 1.0);
        let r = rotate_about(&[Point2::new(2.0, 1.0)], 90.0, &pivot);
        assert_relative_eq!(1.0, r[0].x, epsilon = 1e-12);
        assert_relative_eq!(0.0, r[0].y, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_keeps_pivot_fixed() {
        let pivot = Point2::new(0.075, 0.0);
        let r = rotate_about(&[pivot], 3.0, &pivot);
        assert_relative_eq!(pivot.x, r[0].x, epsilon = 1e-15);
        assert_relative_eq!(pivot.y, r[0].y, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate_positive_angle_drops_trailing_edge() {
        let pivot = Point2::new(0.25, 0.0);
        let r = rotate_about(&[Point2::new(1.0, 0.0), Point2::new(0.0, 0.0)], 5.0, &pivot);
        assert!(r[0].y < 0.0);
        assert!(r[1].y > 0.0);
    }

    #[test_case(0.0, 0.0 ; "minimum endpoint")]
    #[test_case(3.0, 3.0 ; "maximum endpoint")]
    #[test_case(0.5, 1.0 ; "first interval")]
    #[test_case(2.5, 3.5 ; "last interval")]
    #[test_case(2.0, 4.0 ; "on a sample")]
    fn test_interpolate(x: f64, e: f64) {
        let y = interpolate_at_x(&sample_curve(), x).unwrap();
        assert_relative_eq!(e, y, epsilon = 1e-12);
    }

    #[test_case(-0.001)]
    #[test_case(3.001)]
    #[test_case(f64::NAN)]
    fn test_interpolate_out_of_range(x: f64) {
        let r = interpolate_at_x(&sample_curve(), x);
        assert!(matches!(r, Err(SectionError::OutOfRangeQuery { .. })));
    }

    #[test]
    fn test_interpolate_keeps_first_duplicate() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 5.0),
            Point2::new(2.0, 1.0),
        ];
        assert_relative_eq!(0.5, interpolate_at_x(&points, 0.5).unwrap(), epsilon = 1e-12);
        assert_relative_eq!(1.0, interpolate_at_x(&points, 1.5).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_empty() {
        assert!(matches!(
            interpolate_at_x(&[], 0.0),
            Err(SectionError::NotEnoughPoints)
        ));
    }

    #[test]
    fn test_clip_left() {
        let clipped = clip_at_x(&sample_curve(), 1.5, ClipSide::Left).unwrap();
        assert_eq!(3, clipped.len());
        assert_relative_eq!(0.0, clipped[0].x);
        assert_relative_eq!(1.0, clipped[1].x);
        assert_relative_eq!(1.5, clipped[2].x);
        assert_relative_eq!(3.0, clipped[2].y, epsilon = 1e-12);
    }

    #[test]
    fn test_clip_right() {
        let clipped = clip_at_x(&sample_curve(), 1.5, ClipSide::Right).unwrap();
        assert_eq!(3, clipped.len());
        assert_relative_eq!(1.5, clipped[0].x);
        assert_relative_eq!(3.0, clipped[2].x);
    }

    #[test]
    fn test_clip_out_of_range() {
        assert!(clip_at_x(&sample_curve(), 5.0, ClipSide::Left).is_err());
    }
}
