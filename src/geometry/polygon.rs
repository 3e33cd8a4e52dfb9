use ncollide2d::na::Point2;

/// Signed area of the polygon through the given vertices (shoelace formula). The polygon is
/// closed implicitly from the last vertex back to the first. Positive for counter-clockwise
/// ordering, negative for clockwise.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}
