//! Run configuration. One immutable [`AnalysisConfig`] drives a whole analysis; it can be read
//! from JSON, and every omitted field falls back to the reference NACA 6412 wing box case.

use crate::airfoil::generate::{Naca4Digit, TrailingEdge};
use crate::airfoil::spar::{SparCut, DEFAULT_SPAR_POINTS};
use crate::errors::{Result, SectionError};
use crate::geometry::transform::ClipSide;
use crate::shear::ShearLoad;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfoilParams {
    /// Chord length in metres
    pub chord: f64,
    /// Maximum camber as a fraction of the chord
    pub max_camber: f64,
    /// Position of the maximum camber as a fraction of the chord
    pub camber_position: f64,
    /// Maximum thickness as a fraction of the chord
    pub thickness: f64,
    /// Number of stations per surface
    pub points: usize,
    pub trailing_edge: TrailingEdge,
    /// Four digit designation such as "NACA 6412". Overrides the camber and thickness fields.
    pub designation: Option<String>,
}

impl Default for AirfoilParams {
    fn default() -> Self {
        AirfoilParams {
            chord: 0.30,
            max_camber: 0.06,
            camber_position: 0.40,
            thickness: 0.12,
            points: 500,
            trailing_edge: TrailingEdge::Open,
            designation: None,
        }
    }
}

impl AirfoilParams {
    pub fn generator(&self) -> Result<Naca4Digit> {
        match &self.designation {
            Some(code) => Naca4Digit::from_designation(code, self.chord, self.trailing_edge),
            None => Ok(Naca4Digit::new(
                self.chord,
                self.max_camber,
                self.camber_position,
                self.thickness,
                self.trailing_edge,
            )),
        }
    }

    /// The parameters with any designation expanded into the camber and thickness fields
    pub fn resolved(&self) -> Result<AirfoilParams> {
        let naca = self.generator()?;
        Ok(AirfoilParams {
            max_camber: naca.max_camber(),
            camber_position: naca.camber_position(),
            thickness: naca.thickness(),
            designation: None,
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Angle of incidence in degrees
    pub alpha_deg: f64,
    /// Rotation pivot, the quarter chord point when absent
    pub pivot: Option<[f64; 2]>,
    /// Spar position along x in the rotated frame, metres
    pub x_spar: f64,
    pub spar_points: usize,
    pub side: ClipSide,
}

impl Default for Placement {
    fn default() -> Self {
        Placement {
            alpha_deg: 3.0,
            pivot: None,
            x_spar: 0.18,
            spar_points: DEFAULT_SPAR_POINTS,
            side: ClipSide::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub airfoil: AirfoilParams,
    pub placement: Placement,
    /// Uniform wall thickness in metres
    pub wall_thickness: f64,
    pub load: ShearLoad,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            airfoil: AirfoilParams::default(),
            placement: Placement::default(),
            wall_thickness: 1e-3,
            load: ShearLoad::new(0.0, 250.0, 0.1162),
        }
    }
}

fn check(parameter: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<()> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(SectionError::invalid(parameter, value, reason))
    }
}

impl AnalysisConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: AnalysisConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Range checks on every parameter. Whether the spar falls inside the rotated profile is
    /// only known once the curve exists, so that is left to the clipping stage.
    pub fn validate(&self) -> Result<()> {
        let a = &self.airfoil.resolved()?;
        check("chord", a.chord, a.chord > 0.0, "must be positive")?;
        check(
            "max_camber",
            a.max_camber,
            (0.0..0.1).contains(&a.max_camber),
            "must lie in [0, 0.1)",
        )?;
        check(
            "camber_position",
            a.camber_position,
            (0.0..1.0).contains(&a.camber_position),
            "must lie in [0, 1)",
        )?;
        check(
            "thickness",
            a.thickness,
            a.thickness > 0.0 && a.thickness < 0.4,
            "must lie in (0, 0.4)",
        )?;
        check("points", a.points as f64, a.points >= 2, "at least two stations")?;

        let p = &self.placement;
        check("alpha_deg", p.alpha_deg, true, "must be finite")?;
        check("x_spar", p.x_spar, true, "must be finite")?;
        check(
            "spar_points",
            p.spar_points as f64,
            p.spar_points >= 2,
            "at least two points",
        )?;
        if let Some([x, y]) = p.pivot {
            check("pivot.x", x, true, "must be finite")?;
            check("pivot.y", y, true, "must be finite")?;
        }

        check(
            "wall_thickness",
            self.wall_thickness,
            self.wall_thickness > 0.0,
            "must be positive",
        )?;

        let l = &self.load;
        check("sx", l.sx, true, "must be finite")?;
        check("sy", l.sy, true, "must be finite")?;
        check("x_load", l.x_load, true, "must be finite")?;
        Ok(())
    }

    pub fn pivot(&self) -> Point2<f64> {
        match self.placement.pivot {
            Some([x, y]) => Point2::new(x, y),
            None => Point2::new(0.25 * self.airfoil.chord, 0.0),
        }
    }

    pub fn spar_cut(&self) -> SparCut {
        let mut cut = SparCut::new(self.placement.alpha_deg, self.pivot(), self.placement.x_spar)
            .with_spar_points(self.placement.spar_points);
        cut.side = self.placement.side;
        cut
    }
}
