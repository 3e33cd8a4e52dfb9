use crate::airfoil::Airfoil;
use crate::algorithms::linspace;
use crate::contour::{PanelGroup, PanelKind};
use crate::errors::{Result, SectionError};
use crate::geometry::transform::{clip_at_x, interpolate_at_x, rotate_about, ClipSide};
use log::debug;
use ncollide2d::na::Point2;
use serde::Serialize;

pub const DEFAULT_SPAR_POINTS: usize = 101;

/// Places the profile at its working incidence and closes it with a vertical spar web. The spar
/// position is measured in the rotated frame.
#[derive(Debug, Clone)]
pub struct SparCut {
    pub alpha_deg: f64,
    pub pivot: Point2<f64>,
    pub x_spar: f64,
    pub spar_points: usize,
    pub side: ClipSide,
}

impl SparCut {
    /// A cut keeping the part of the profile ahead of the spar
    pub fn new(alpha_deg: f64, pivot: Point2<f64>, x_spar: f64) -> SparCut {
        SparCut {
            alpha_deg,
            pivot,
            x_spar,
            spar_points: DEFAULT_SPAR_POINTS,
            side: ClipSide::Left,
        }
    }

    pub fn with_spar_points(mut self, n: usize) -> Self {
        self.spar_points = n;
        self
    }

    /// Rotates both surfaces, cuts them at the spar and orients the three chains so that
    /// upper, lower and spar joined in that order run once around the cell.
    pub fn apply(&self, airfoil: &Airfoil) -> Result<ClippedSection> {
        if self.spar_points < 2 {
            return Err(SectionError::invalid(
                "spar_points",
                self.spar_points as f64,
                "the spar web needs at least two points",
            ));
        }

        let upper = rotate_about(&airfoil.upper, self.alpha_deg, &self.pivot);
        let lower = rotate_about(&airfoil.lower, self.alpha_deg, &self.pivot);

        let y_top = interpolate_at_x(&upper, self.x_spar)?;
        let y_bot = interpolate_at_x(&lower, self.x_spar)?;
        if !(y_top > y_bot) {
            return Err(SectionError::DegenerateSection(format!(
                "upper surface ({}) is not above lower surface ({}) at the spar",
                y_top, y_bot
            )));
        }

        let mut upper_kept = clip_at_x(&upper, self.x_spar, self.side)?;
        let mut lower_kept = clip_at_x(&lower, self.x_spar, self.side)?;

        // Both clipped chains run in increasing x. Whichever side is kept, the upper chain leaves
        // the top of the web and the lower chain arrives at its bottom, so the web always runs
        // upwards. Ahead of the spar this is a counter-clockwise loop, behind it a clockwise one.
        match self.side {
            ClipSide::Left => upper_kept.reverse(),
            ClipSide::Right => lower_kept.reverse(),
        }
        let web_y = linspace(y_bot, y_top, self.spar_points);
        let web: Vec<Point2<f64>> = web_y
            .into_iter()
            .map(|y| Point2::new(self.x_spar, y))
            .collect();

        let section = ClippedSection {
            upper: PanelGroup::from_points(PanelKind::Upper, &upper_kept)?,
            lower: PanelGroup::from_points(PanelKind::Lower, &lower_kept)?,
            spar: PanelGroup::from_points(PanelKind::Spar, &web)?,
            web: SparWeb {
                x: self.x_spar,
                y_top,
                y_bot,
            },
        };

        debug!(
            "cut at x = {:.6} after rotating {} deg: {} upper, {} lower, {} spar points, web height {:.6}",
            self.x_spar,
            self.alpha_deg,
            section.upper.len(),
            section.lower.len(),
            section.spar.len(),
            section.web.height()
        );

        Ok(section)
    }
}

/// End points of the spar web
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SparWeb {
    pub x: f64,
    pub y_top: f64,
    pub y_bot: f64,
}

impl SparWeb {
    pub fn height(&self) -> f64 {
        self.y_top - self.y_bot
    }
}

/// The three oriented chains of the closed cell
#[derive(Debug, Clone)]
pub struct ClippedSection {
    pub upper: PanelGroup,
    pub lower: PanelGroup,
    pub spar: PanelGroup,
    pub web: SparWeb,
}

impl ClippedSection {
    pub fn groups(&self) -> [&PanelGroup; 3] {
        [&self.upper, &self.lower, &self.spar]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::generate::{AirfoilGenerator, Naca4Digit, TrailingEdge};
    use crate::geometry::distances2::dist;
    use approx::assert_relative_eq;

    fn naca_6412() -> Airfoil {
        Naca4Digit::new(0.30, 0.06, 0.40, 0.12, TrailingEdge::Open).generate(500)
    }

    fn reference_cut() -> SparCut {
        SparCut::new(3.0, Point2::new(0.075, 0.0), 0.18)
    }

    #[test]
    fn test_spar_lies_between_surfaces() {
        let section = reference_cut().apply(&naca_6412()).unwrap();
        assert!(section.web.y_top > section.web.y_bot);

        let first = section.upper.first().unwrap();
        let last = section.lower.last().unwrap();
        assert_relative_eq!(0.18, first.x, epsilon = 1e-15);
        assert_relative_eq!(section.web.y_top, first.y, epsilon = 1e-15);
        assert_relative_eq!(0.18, last.x, epsilon = 1e-15);
        assert_relative_eq!(section.web.y_bot, last.y, epsilon = 1e-15);
    }

    #[test]
    fn test_chains_join_end_to_end() {
        let section = reference_cut().apply(&naca_6412()).unwrap();
        let groups = section.groups();
        for i in 0..3 {
            let end = groups[i].last().unwrap();
            let start = groups[(i + 1) % 3].first().unwrap();
            assert!(dist(&end, &start) < 1e-3, "gap after the {} group", groups[i].kind());
        }
    }

    #[test]
    fn test_web_runs_bottom_to_top() {
        let section = reference_cut().apply(&naca_6412()).unwrap();
        assert_eq!(DEFAULT_SPAR_POINTS, section.spar.len());
        let first = section.spar.first().unwrap();
        let last = section.spar.last().unwrap();
        assert_eq!(section.web.y_bot, first.y);
        assert_eq!(section.web.y_top, last.y);
        assert_relative_eq!(section.web.height(), section.spar.length(), epsilon = 1e-12);
    }

    #[test]
    fn test_arc_length_starts_at_zero_and_grows() {
        let section = reference_cut().apply(&naca_6412()).unwrap();
        for group in section.groups() {
            assert_eq!(0.0, group.points()[0].s);
            assert!(group.points().windows(2).all(|w| w[1].s >= w[0].s));
        }
    }

    #[test]
    fn test_spar_outside_chord_fails() {
        let cut = SparCut::new(3.0, Point2::new(0.075, 0.0), 0.45);
        assert!(matches!(
            cut.apply(&naca_6412()),
            Err(SectionError::OutOfRangeQuery { .. })
        ));
    }

    #[test]
    fn test_single_spar_point_rejected() {
        let cut = reference_cut().with_spar_points(1);
        assert!(matches!(
            cut.apply(&naca_6412()),
            Err(SectionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_right_side_keeps_aft_box() {
        let mut cut = SparCut::new(0.0, Point2::new(0.075, 0.0), 0.1);
        cut.side = ClipSide::Right;
        let section = cut.apply(&naca_6412()).unwrap();
        assert!(section.upper.points().iter().all(|p| p.x >= 0.1 - 1e-12));

        // upper runs aft from the spar, lower comes back to it, web goes up
        assert_relative_eq!(0.1, section.upper.first().unwrap().x, epsilon = 1e-15);
        assert_relative_eq!(0.1, section.lower.last().unwrap().x, epsilon = 1e-15);
        assert!(section.spar.first().unwrap().y < section.spar.last().unwrap().y);
    }
}
