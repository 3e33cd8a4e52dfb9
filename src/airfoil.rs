use ncollide2d::na::Point2;

pub mod generate;
pub mod spar;

/// The camber line point and the two surface points generated at one chord fraction
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// Surface coordinates of an airfoil. All three sequences run from the leading edge to the
/// trailing edge and have the same length.
#[derive(Debug, Clone)]
pub struct Airfoil {
    pub camber: Vec<Point2<f64>>,
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
}

impl Airfoil {
    pub fn from_stations(stations: &[CamberStation]) -> Airfoil {
        Airfoil {
            camber: stations.iter().map(|s| s.camber).collect(),
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().map(|s| s.lower).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }

    /// The upper surface from leading to trailing edge followed by the lower surface back to
    /// the leading edge.
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result = self.upper.to_vec();
        let mut lower = self.lower.to_vec();
        lower.reverse();
        result.append(&mut lower);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::generate::{AirfoilGenerator, Naca4Digit, TrailingEdge};

    #[test]
    fn test_outer_contour_wraps_around() {
        let airfoil = Naca4Digit::new(1.0, 0.02, 0.4, 0.12, TrailingEdge::Closed).generate(11);
        let contour = airfoil.to_outer_contour();

        assert_eq!(22, contour.len());
        assert_eq!(airfoil.upper[0], contour[0]);
        assert_eq!(airfoil.upper[10], contour[10]);
        assert_eq!(airfoil.lower[10], contour[11]);
        assert_eq!(airfoil.lower[0], contour[21]);
    }
}
