//! The discretized boundary of the thin-walled cell: ordered point chains (panel groups) and the
//! straight panels built from them.

use crate::errors::{Result, SectionError};
use crate::geometry::distances2::{cumulative_lengths, dist, mid_point, segment_angle};
use itertools::Itertools;
use log::{debug, warn};
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Panels shorter than this are treated as duplicate points at a seam and dropped.
pub const MIN_PANEL_LENGTH: f64 = 1e-12;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Upper,
    Lower,
    Spar,
}

impl PanelKind {
    /// The fixed order in which the groups are joined into a contour
    pub const TRAVERSAL: [PanelKind; 3] = [PanelKind::Upper, PanelKind::Lower, PanelKind::Spar];

    pub fn name(&self) -> &'static str {
        match self {
            PanelKind::Upper => "upper",
            PanelKind::Lower => "lower",
            PanelKind::Spar => "spar",
        }
    }
}

impl Display for PanelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PanelKind {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(PanelKind::Upper),
            "lower" => Ok(PanelKind::Lower),
            "spar" => Ok(PanelKind::Spar),
            other => Err(SectionError::MalformedInput(format!(
                "unknown panel group '{}'",
                other
            ))),
        }
    }
}

/// A point on the contour together with its arc length from the start of its group
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    pub s: f64,
}

impl ContourPoint {
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// An ordered chain of contour points sharing one traversal direction. The first point has
/// `s = 0` and `s` never decreases along the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelGroup {
    kind: PanelKind,
    points: Vec<ContourPoint>,
}

impl PanelGroup {
    /// Builds a group from points already in traversal order, annotating each with its
    /// cumulative arc length.
    pub fn from_points(kind: PanelKind, points: &[Point2<f64>]) -> Result<Self> {
        if points.len() < 2 {
            return Err(SectionError::NotEnoughPoints);
        }

        let lengths = cumulative_lengths(points);
        let points = points
            .iter()
            .zip(lengths)
            .map(|(p, s)| ContourPoint { x: p.x, y: p.y, s })
            .collect();

        Ok(PanelGroup { kind, points })
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arc length of the whole chain
    pub fn length(&self) -> f64 {
        self.points.last().map(|p| p.s).unwrap_or(0.0)
    }

    pub fn first(&self) -> Option<Point2<f64>> {
        self.points.first().map(ContourPoint::point)
    }

    pub fn last(&self) -> Option<Point2<f64>> {
        self.points.last().map(ContourPoint::point)
    }
}

/// A straight segment between two consecutive points of a group
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub xm: f64,
    pub ym: f64,
    pub ds: f64,
    pub theta: f64,
}

impl Panel {
    /// Returns `None` for a segment shorter than [`MIN_PANEL_LENGTH`]
    pub fn between(kind: PanelKind, a: &Point2<f64>, b: &Point2<f64>) -> Option<Panel> {
        let ds = dist(a, b);
        if !(ds > MIN_PANEL_LENGTH) {
            return None;
        }

        let m = mid_point(a, b);
        Some(Panel {
            kind,
            xm: m.x,
            ym: m.y,
            ds,
            theta: segment_angle(a, b),
        })
    }

    pub fn mid(&self) -> Point2<f64> {
        Point2::new(self.xm, self.ym)
    }
}

/// The ordered panels of every group, joined in the fixed upper, lower, spar order. The panels
/// trace the closed cell once, counter-clockwise, ending where the first panel starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contour {
    panels: Vec<Panel>,
}

impl Contour {
    /// Panelizes the given groups. Groups are reordered into the fixed traversal order; degenerate
    /// segments are dropped.
    pub fn from_groups(groups: &[&PanelGroup]) -> Result<Self> {
        let mut panels = Vec::new();
        for kind in PanelKind::TRAVERSAL.iter() {
            for group in groups.iter().filter(|g| g.kind() == *kind) {
                let before = panels.len();
                let mut dropped = 0;
                for (a, b) in group.points().iter().tuple_windows() {
                    match Panel::between(group.kind(), &a.point(), &b.point()) {
                        Some(panel) => panels.push(panel),
                        None => dropped += 1,
                    }
                }

                if dropped > 0 {
                    warn!(
                        "dropped {} zero-length segment(s) in the {} group",
                        dropped,
                        group.kind()
                    );
                }
                debug!("{} group: {} panels", group.kind(), panels.len() - before);
            }
        }

        Contour::from_panels(panels)
    }

    /// Wraps panels that were computed elsewhere, e.g. read back from a table. Panel order is
    /// taken as given.
    pub fn from_panels(panels: Vec<Panel>) -> Result<Self> {
        if panels.is_empty() {
            return Err(SectionError::DegenerateSection(
                "contour has no panels".to_string(),
            ));
        }

        if let Some(bad) = panels.iter().find(|p| !(p.ds > 0.0)) {
            return Err(SectionError::MalformedInput(format!(
                "panel with non-positive length {} in the {} group",
                bad.ds, bad.kind
            )));
        }

        Ok(Contour { panels })
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Total length of the traversal
    pub fn perimeter(&self) -> f64 {
        self.panels.iter().map(|p| p.ds).sum()
    }

    /// Summed panel length for each group present, in traversal order
    pub fn group_lengths(&self) -> Vec<(PanelKind, f64)> {
        PanelKind::TRAVERSAL
            .iter()
            .filter_map(|kind| {
                let panels: Vec<&Panel> = self.panels.iter().filter(|p| p.kind == *kind).collect();
                if panels.is_empty() {
                    None
                } else {
                    Some((*kind, panels.iter().map(|p| p.ds).sum()))
                }
            })
            .collect()
    }

    pub fn midpoints(&self) -> Vec<Point2<f64>> {
        self.panels.iter().map(Panel::mid).collect()
    }
}
