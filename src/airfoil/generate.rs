use crate::airfoil::{Airfoil, CamberStation};
use crate::algorithms::linspace;
use crate::errors::{Result, SectionError};
use ncollide2d::na::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Camber positions closer to the leading edge than this are treated as an uncambered profile
const MIN_CAMBER_POSITION: f64 = 1e-6;

/// An AirfoilGenerator is an entity which can generate the x, y position of the mean camber line,
/// its slope, and the airfoil half thickness at fractions of the chord. This provides the
/// information necessary to compute the exact airfoil surfaces.
pub trait AirfoilGenerator {
    /// Return a 2D point with the position of the camber line at a fraction from 0.0 to 1.0
    fn camber_line(&self, u: f64) -> Point2<f64>;

    /// Return the slope dyc/dx of the camber line at a fraction from 0.0 to 1.0
    fn camber_slope(&self, u: f64) -> f64;

    /// Return the half thickness of the airfoil, measured normal to the camber line, at a
    /// fraction from 0.0 to 1.0
    fn half_thickness(&self, u: f64) -> f64;

    /// Offsets the camber point by the half thickness along the local normal of the camber line
    fn station_at(&self, u: f64) -> CamberStation {
        let camber = self.camber_line(u);
        let theta = self.camber_slope(u).atan();
        let yt = self.half_thickness(u);
        let offset = Vector2::new(-yt * theta.sin(), yt * theta.cos());

        CamberStation::new(camber, camber + offset, camber - offset)
    }

    /// Generates `n` stations uniformly spaced in chord fraction, leading edge first
    fn generate(&self, n: usize) -> Airfoil {
        let stations: Vec<CamberStation> = linspace(0.0, 1.0, n)
            .into_iter()
            .map(|u| self.station_at(u))
            .collect();

        Airfoil::from_stations(&stations)
    }
}

/// Selects the coefficient of the last term of the thickness polynomial
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingEdge {
    /// Zero thickness at the trailing edge
    Closed,
    /// The classic coefficient, which leaves a small finite trailing edge thickness
    Open,
}

impl TrailingEdge {
    fn k5(&self) -> f64 {
        match self {
            TrailingEdge::Closed => -0.1036,
            TrailingEdge::Open => -0.1015,
        }
    }
}

/// Which of the two parabolic arcs of the camber line applies at a chord fraction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CamberBranch {
    /// No camber at all, either zero camber or a camber position at the leading edge
    Flat,
    /// Ahead of the point of maximum camber
    Forward,
    /// At or behind the point of maximum camber
    Aft,
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
#[derive(Debug, Clone)]
pub struct Naca4Digit {
    chord_len: f64,
    m: f64,
    p: f64,
    t: f64,
    trailing_edge: TrailingEdge,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator.
    ///
    /// # Arguments
    ///
    /// * `chord_len` - the actual length of the airfoil chord
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// * `trailing_edge` - closed or classic open trailing edge
    pub fn new(
        chord_len: f64,
        max_camber: f64,
        max_camber_chord: f64,
        t_max: f64,
        trailing_edge: TrailingEdge,
    ) -> Naca4Digit {
        Naca4Digit {
            chord_len,
            m: max_camber,
            p: max_camber_chord,
            t: t_max,
            trailing_edge,
        }
    }

    /// Parses a four digit designation such as "2412" or "NACA 0012"
    pub fn from_designation(code: &str, chord_len: f64, trailing_edge: TrailingEdge) -> Result<Self> {
        let trimmed = code.trim();
        let digits = trimmed
            .strip_prefix("NACA")
            .or_else(|| trimmed.strip_prefix("naca"))
            .unwrap_or(trimmed)
            .trim();

        let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 4 || values.len() != 4 {
            return Err(SectionError::MalformedInput(format!(
                "'{}' is not a four digit airfoil designation",
                code
            )));
        }

        Ok(Naca4Digit::new(
            chord_len,
            values[0] as f64 / 100.0,
            values[1] as f64 / 10.0,
            (values[2] * 10 + values[3]) as f64 / 100.0,
            trailing_edge,
        ))
    }

    pub fn chord_len(&self) -> f64 {
        self.chord_len
    }

    pub fn max_camber(&self) -> f64 {
        self.m
    }

    pub fn camber_position(&self) -> f64 {
        self.p
    }

    pub fn thickness(&self) -> f64 {
        self.t
    }

    /// The value exactly at the point of maximum camber belongs to the aft branch; both branches
    /// agree there in value and slope.
    pub fn branch(&self, u: f64) -> CamberBranch {
        if self.m == 0.0 || self.p < MIN_CAMBER_POSITION {
            CamberBranch::Flat
        } else if u < self.p {
            CamberBranch::Forward
        } else {
            CamberBranch::Aft
        }
    }
}

impl AirfoilGenerator for Naca4Digit {
    fn camber_line(&self, u: f64) -> Point2<f64> {
        let y = match self.branch(u) {
            CamberBranch::Flat => 0.0,
            CamberBranch::Forward => (self.m / self.p.powi(2)) * (2.0 * self.p * u - u.powi(2)),
            CamberBranch::Aft => {
                (self.m / (1.0 - self.p).powi(2))
                    * ((1.0 - 2.0 * self.p) + 2.0 * self.p * u - u.powi(2))
            }
        };

        Point2::new(u * self.chord_len, y * self.chord_len)
    }

    fn camber_slope(&self, u: f64) -> f64 {
        match self.branch(u) {
            CamberBranch::Flat => 0.0,
            CamberBranch::Forward => (2.0 * self.m / self.p.powi(2)) * (self.p - u),
            CamberBranch::Aft => (2.0 * self.m / (1.0 - self.p).powi(2)) * (self.p - u),
        }
    }

    fn half_thickness(&self, u: f64) -> f64 {
        (5.0 * self.t * self.chord_len)
            * (0.2969 * u.sqrt() - 0.1260 * u - 0.3516 * u.powi(2) + 0.2843 * u.powi(3)
                + self.trailing_edge.k5() * u.powi(4))
    }
}
