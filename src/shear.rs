//! Shear flow in a single closed cell under a transverse shear load.
//!
//! The open-section ("basic") flow is integrated from the first panel of the contour, which
//! acts as the cut. A uniform redundant flow `q0` then balances the torque of the basic flow
//! against the eccentricity of the load. Positive flow acts against the direction in which the
//! contour is traversed, so that the flows on the section add up to the applied load.

use crate::contour::{Contour, Panel};
use crate::errors::{Result, SectionError};
use crate::geometry::polygon::signed_area;
use crate::section::SectionProperties;
use log::debug;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};

/// Point about which the moment arms of the panel flows are measured.
///
/// `Origin` takes the arms `xm sin(theta) - ym cos(theta)` from the coordinate origin while the
/// load eccentricity is taken about the centroid. `Centroid` measures both about the centroid.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TorqueReference {
    #[default]
    Origin,
    Centroid,
}

impl TorqueReference {
    pub fn point(&self, props: &SectionProperties) -> Point2<f64> {
        match self {
            TorqueReference::Origin => Point2::origin(),
            TorqueReference::Centroid => Point2::new(props.xbar, props.ybar),
        }
    }
}

/// Transverse shear components and the chordwise line of action of `Sy`. `Sx` is taken to act
/// through the centroid and adds no torque.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearLoad {
    pub sx: f64,
    pub sy: f64,
    pub x_load: f64,
    #[serde(default)]
    pub torque_reference: TorqueReference,
}

impl ShearLoad {
    pub fn new(sx: f64, sy: f64, x_load: f64) -> ShearLoad {
        ShearLoad {
            sx,
            sy,
            x_load,
            torque_reference: TorqueReference::Origin,
        }
    }

    pub fn with_torque_reference(mut self, reference: TorqueReference) -> Self {
        self.torque_reference = reference;
        self
    }

    /// Torque of the load about the centroid, counter-clockwise positive
    pub fn torque_about(&self, props: &SectionProperties) -> f64 {
        self.sy * (self.x_load - props.xbar)
    }
}

/// Running first moments of the wall about the centroidal axes, `Qx = sum t (ym - ybar) ds`
/// and `Qy = sum t (xm - xbar) ds`
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstMoments {
    pub qx: f64,
    pub qy: f64,
}

impl FirstMoments {
    /// The accumulator after adding one more panel
    pub fn advance(self, panel: &Panel, props: &SectionProperties) -> FirstMoments {
        let t = props.thickness;
        FirstMoments {
            qx: self.qx + t * (panel.ym - props.ybar) * panel.ds,
            qy: self.qy + t * (panel.xm - props.xbar) * panel.ds,
        }
    }
}

/// The two constants of the unsymmetric bending shear flow, `qs_b = -(a Qy + b Qx)`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BendingCoefficients {
    pub a: f64,
    pub b: f64,
}

impl BendingCoefficients {
    pub fn new(props: &SectionProperties, load: &ShearLoad) -> Result<Self> {
        let d = props.product_determinant();
        let scale = (props.ixx * props.iyy).abs();
        if !d.is_finite() || d.abs() <= f64::EPSILON * scale || d == 0.0 {
            return Err(SectionError::DegenerateSection(format!(
                "Ixx * Iyy - Ixy^2 = {:e}, principal axes are undefined",
                d
            )));
        }

        Ok(BendingCoefficients {
            a: -(load.sx * props.ixx - load.sy * props.ixy) / d,
            b: -(load.sy * props.iyy - load.sx * props.ixy) / d,
        })
    }

    pub fn basic_flow(&self, moments: &FirstMoments) -> f64 {
        -(self.a * moments.qy + self.b * moments.qx)
    }
}

/// Flows and stress on one panel
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ShearFlowPanel {
    pub panel: Panel,
    pub qx: f64,
    pub qy: f64,
    pub qs_b: f64,
    pub q_total: f64,
    pub tau: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShearFlowSolution {
    pub panels: Vec<ShearFlowPanel>,
    /// Area enclosed by the panel midpoints
    pub cell_area: f64,
    pub torque_reference: TorqueReference,
    /// Torque of the basic flow about the reference point
    pub basic_torque: f64,
    pub external_torque: f64,
    pub q0: f64,
}

impl ShearFlowSolution {
    /// Force exerted by the total flow on the section, `-sum q ds (cos theta, sin theta)`.
    /// Matches `(Sx, Sy)` for an equilibrated solution.
    pub fn resultant_force(&self) -> (f64, f64) {
        self.panels.iter().fold((0.0, 0.0), |(fx, fy), p| {
            let f = p.q_total * p.panel.ds;
            (fx - f * p.panel.theta.cos(), fy - f * p.panel.theta.sin())
        })
    }

    /// Torque of the total flow about the reference point. Balances the load eccentricity,
    /// `Sy (x_load - xbar)`.
    pub fn resultant_torque(&self, props: &SectionProperties) -> f64 {
        let reference = self.torque_reference.point(props);
        -self
            .panels
            .iter()
            .map(|p| moment_arm(&p.panel, &reference) * p.q_total * p.panel.ds)
            .sum::<f64>()
    }

    pub fn max_abs_flow(&self) -> f64 {
        self.panels
            .iter()
            .map(|p| p.q_total.abs())
            .fold(0.0, f64::max)
    }
}

/// Perpendicular distance from `reference` to the panel's line of action, signed positive
/// when the panel runs counter-clockwise around it
pub fn moment_arm(panel: &Panel, reference: &Point2<f64>) -> f64 {
    (panel.xm - reference.x) * panel.theta.sin() - (panel.ym - reference.y) * panel.theta.cos()
}

/// Cumulative first moments along the whole contour. The sums carry across group boundaries;
/// the first panel already includes its own contribution.
pub fn first_moments(contour: &Contour, props: &SectionProperties) -> Vec<FirstMoments> {
    contour
        .panels()
        .iter()
        .scan(FirstMoments::default(), |acc, panel| {
            *acc = acc.advance(panel, props);
            Some(*acc)
        })
        .collect()
}

/// Solves the closed single-cell shear flow for the given load
pub fn solve(
    contour: &Contour,
    props: &SectionProperties,
    load: &ShearLoad,
) -> Result<ShearFlowSolution> {
    let coefficients = BendingCoefficients::new(props, load)?;
    let moments = first_moments(contour, props);
    let basic: Vec<f64> = moments.iter().map(|m| coefficients.basic_flow(m)).collect();

    let oriented_area = signed_area(&contour.midpoints());
    let cell_area = oriented_area.abs();
    if !cell_area.is_finite() || cell_area <= f64::EPSILON * contour.perimeter().powi(2) {
        return Err(SectionError::DegenerateSection(format!(
            "enclosed cell area is {:e}",
            oriented_area
        )));
    }

    let reference = load.torque_reference.point(props);
    let basic_torque: f64 = contour
        .panels()
        .iter()
        .zip(basic.iter())
        .map(|(p, q)| moment_arm(p, &reference) * q * p.ds)
        .sum();
    let external_torque = -load.torque_about(props);

    // A clockwise traversal reverses the sense in which q0 circulates
    let sense = oriented_area.signum();
    let q0 = sense * (external_torque - basic_torque) / (2.0 * cell_area);

    debug!(
        "cell area {:e}, basic torque {:e} about the {:?}, external torque {:e}, q0 = {:e}",
        cell_area, basic_torque, load.torque_reference, external_torque, q0
    );

    let t = props.thickness;
    let panels = contour
        .panels()
        .iter()
        .zip(moments)
        .zip(basic)
        .map(|((panel, m), qs_b)| {
            let q_total = qs_b + q0;
            ShearFlowPanel {
                panel: *panel,
                qx: m.qx,
                qy: m.qy,
                qs_b,
                q_total,
                tau: q_total / t,
            }
        })
        .collect();

    Ok(ShearFlowSolution {
        panels,
        cell_area,
        torque_reference: load.torque_reference,
        basic_torque,
        external_torque,
        q0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::{PanelGroup, PanelKind};
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn steps(a: (f64, f64), b: (f64, f64), n: usize) -> Vec<Point2<f64>> {
        (0..=n)
            .map(|i| {
                let f = i as f64 / n as f64;
                Point2::new(a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f)
            })
            .collect()
    }

    /// Counter-clockwise rectangular box of width `b` and height `h`, spar on the right
    fn box_contour(b: f64, h: f64, n: usize) -> Contour {
        let mut upper = steps((b, h), (0.0, h), n);
        upper.extend(steps((0.0, h), (0.0, h / 2.0), n).into_iter().skip(1));
        let mut lower = steps((0.0, h / 2.0), (0.0, 0.0), n);
        lower.extend(steps((0.0, 0.0), (b, 0.0), n).into_iter().skip(1));
        let spar = steps((b, 0.0), (b, h), n);

        let upper = PanelGroup::from_points(PanelKind::Upper, &upper).unwrap();
        let lower = PanelGroup::from_points(PanelKind::Lower, &lower).unwrap();
        let spar = PanelGroup::from_points(PanelKind::Spar, &spar).unwrap();
        Contour::from_groups(&[&upper, &lower, &spar]).unwrap()
    }

    #[test]
    fn test_first_moments_return_to_zero() {
        let contour = box_contour(0.2, 0.1, 40);
        let props = SectionProperties::from_contour(&contour, 1e-3).unwrap();
        let moments = first_moments(&contour, &props);

        assert_eq!(contour.len(), moments.len());
        let last = moments.last().unwrap();
        assert_relative_eq!(0.0, last.qx, epsilon = 1e-15);
        assert_relative_eq!(0.0, last.qy, epsilon = 1e-15);

        let first = contour.panels()[0];
        assert_relative_eq!(1e-3 * (first.ym - props.ybar) * first.ds, moments[0].qx);
    }

    #[test]
    fn test_force_equilibrium() {
        let contour = box_contour(0.2, 0.1, 400);
        let props = SectionProperties::from_contour(&contour, 1e-3).unwrap();
        let load = ShearLoad::new(120.0, 250.0, 0.05);
        let solution = solve(&contour, &props, &load).unwrap();

        let (fx, fy) = solution.resultant_force();
        assert_relative_eq!(load.sx, fx, max_relative = 2e-2);
        assert_relative_eq!(load.sy, fy, max_relative = 2e-2);
    }

    #[test_case(TorqueReference::Origin ; "origin")]
    #[test_case(TorqueReference::Centroid ; "centroid")]
    fn test_moment_equilibrium(reference: TorqueReference) {
        let contour = box_contour(0.2, 0.1, 40);
        let props = SectionProperties::from_contour(&contour, 1e-3).unwrap();
        let load = ShearLoad::new(0.0, 250.0, 0.03).with_torque_reference(reference);
        let solution = solve(&contour, &props, &load).unwrap();

        assert_eq!(reference, solution.torque_reference);
        let torque = solution.resultant_torque(&props);
        assert_relative_eq!(load.torque_about(&props), torque, max_relative = 1e-2);
    }

    #[test]
    fn test_reference_point_shifts_q0() {
        // Arms about the centroid add the moment of the basic flow resultant about the origin,
        // `xbar Sy - ybar Sx`, to the basic torque
        let contour = box_contour(0.2, 0.1, 400);
        let props = SectionProperties::from_contour(&contour, 1e-3).unwrap();
        let load = ShearLoad::new(0.0, 250.0, 0.03);
        let origin = solve(&contour, &props, &load).unwrap();
        let centroid = solve(
            &contour,
            &props,
            &load.with_torque_reference(TorqueReference::Centroid),
        )
        .unwrap();

        let shift = props.xbar * load.sy / (2.0 * origin.cell_area);
        assert_relative_eq!(-shift, centroid.q0 - origin.q0, max_relative = 2e-2);
    }

    #[test]
    fn test_clockwise_contour_balances() {
        // The same box traversed the other way round
        let ccw = box_contour(0.2, 0.1, 400);
        let panels: Vec<Panel> = ccw
            .panels()
            .iter()
            .rev()
            .map(|p| Panel {
                theta: p.theta + std::f64::consts::PI,
                ..*p
            })
            .collect();
        let cw = Contour::from_panels(panels).unwrap();
        let props = SectionProperties::from_contour(&cw, 1e-3).unwrap();
        let load = ShearLoad::new(0.0, 250.0, 0.03);
        let solution = solve(&cw, &props, &load).unwrap();

        assert!(signed_area(&cw.midpoints()) < 0.0);
        assert!(solution.cell_area > 0.0);
        let (fx, fy) = solution.resultant_force();
        assert_relative_eq!(load.sy, fy, max_relative = 2e-2);
        assert!(fx.abs() < 2e-2 * load.sy, "fx = {}", fx);
        assert_relative_eq!(
            load.torque_about(&props),
            solution.resultant_torque(&props),
            max_relative = 1e-2
        );
    }

    #[test]
    fn test_load_through_centroid_of_symmetric_box() {
        // A doubly symmetric box loaded through its centroid: no torque, and the two webs
        // share the vertical load equally
        let contour = box_contour(0.2, 0.1, 200);
        let props = SectionProperties::from_contour(&contour, 1e-3).unwrap();
        let load = ShearLoad::new(0.0, 100.0, props.xbar);
        let solution = solve(&contour, &props, &load).unwrap();
        assert_relative_eq!(0.0, solution.external_torque, epsilon = 1e-12);

        let web_force = |x: f64| -> f64 {
            solution
                .panels
                .iter()
                .filter(|p| (p.panel.xm - x).abs() < 1e-9)
                .map(|p| -p.q_total * p.panel.ds * p.panel.theta.sin())
                .sum()
        };
        assert_relative_eq!(50.0, web_force(0.0), max_relative = 2e-2);
        assert_relative_eq!(50.0, web_force(0.2), max_relative = 2e-2);
    }

    #[test]
    fn test_enclosed_area_and_stress() {
        let contour = box_contour(0.2, 0.1, 40);
        let props = SectionProperties::from_contour(&contour, 2e-3).unwrap();
        let solution = solve(&contour, &props, &ShearLoad::new(0.0, 250.0, 0.1)).unwrap();

        assert_relative_eq!(0.02, solution.cell_area, max_relative = 1e-2);
        for p in solution.panels.iter() {
            assert_relative_eq!(p.q_total, p.qs_b + solution.q0, epsilon = 1e-12);
            assert_relative_eq!(p.tau, p.q_total / 2e-3, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_determinant_is_degenerate() {
        let props = SectionProperties {
            thickness: 1e-3,
            area: 1e-4,
            xbar: 0.0,
            ybar: 0.0,
            ixx: 2e-6,
            iyy: 2e-6,
            ixy: 2e-6,
        };
        let r = BendingCoefficients::new(&props, &ShearLoad::new(0.0, 1.0, 0.0));
        assert!(matches!(r, Err(SectionError::DegenerateSection(_))));
    }

    #[test]
    fn test_collinear_contour_has_no_cell() {
        let props = SectionProperties::from_contour(&box_contour(0.2, 0.1, 4), 1e-3).unwrap();
        let panel = |xm: f64, ds: f64, theta: f64| Panel {
            kind: PanelKind::Upper,
            xm,
            ym: 0.0,
            ds,
            theta,
        };
        let flat = Contour::from_panels(vec![
            panel(0.25, 0.5, 0.0),
            panel(0.75, 0.5, 0.0),
            panel(0.5, 1.0, std::f64::consts::PI),
        ])
        .unwrap();

        let r = solve(&flat, &props, &ShearLoad::new(0.0, 1.0, 0.0));
        assert!(matches!(r, Err(SectionError::DegenerateSection(_))));
    }
}
