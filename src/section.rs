//! Thin-wall section properties by line integration over the contour panels. Each panel
//! contributes its midpoint value times its own length (first-order midpoint rule).

use crate::contour::{Contour, PanelKind};
use crate::errors::{Result, SectionError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Area, centroid and centroidal second moments of a uniform thin wall
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub thickness: f64,
    pub area: f64,
    pub xbar: f64,
    pub ybar: f64,
    pub ixx: f64,
    pub iyy: f64,
    pub ixy: f64,
}

impl SectionProperties {
    pub fn from_contour(contour: &Contour, thickness: f64) -> Result<Self> {
        if !(thickness > 0.0) || !thickness.is_finite() {
            return Err(SectionError::invalid(
                "thickness",
                thickness,
                "wall thickness must be positive",
            ));
        }

        let panels = contour.panels();
        let length = contour.perimeter();
        let area = thickness * length;
        if !(area > 0.0) {
            return Err(SectionError::DegenerateSection(
                "contour has zero length".to_string(),
            ));
        }

        let t = thickness;
        let xbar = panels.iter().map(|p| t * p.xm * p.ds).sum::<f64>() / area;
        let ybar = panels.iter().map(|p| t * p.ym * p.ds).sum::<f64>() / area;

        let ixx = panels.iter().map(|p| t * (p.ym - ybar).powi(2) * p.ds).sum();
        let iyy = panels.iter().map(|p| t * (p.xm - xbar).powi(2) * p.ds).sum();
        let ixy = panels
            .iter()
            .map(|p| t * (p.xm - xbar) * (p.ym - ybar) * p.ds)
            .sum();

        let properties = SectionProperties {
            thickness,
            area,
            xbar,
            ybar,
            ixx,
            iyy,
            ixy,
        };
        debug!("section properties over {} panels: {:?}", panels.len(), properties);

        Ok(properties)
    }

    /// `Ixx * Iyy - Ixy^2`, zero when the principal axes are undefined
    pub fn product_determinant(&self) -> f64 {
        self.ixx * self.iyy - self.ixy * self.ixy
    }
}

impl Display for SectionProperties {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Thin-wall section (midpoint rule) ===")?;
        writeln!(f, "t    = {:.2} mm", self.thickness * 1e3)?;
        writeln!(f, "A    = {:.2} mm^2", self.area * 1e6)?;
        writeln!(f, "xbar = {:.2} mm", self.xbar * 1e3)?;
        writeln!(f, "ybar = {:.2} mm", self.ybar * 1e3)?;
        writeln!(f, "Ixx  = {:.0} mm^4", self.ixx * 1e12)?;
        writeln!(f, "Iyy  = {:.0} mm^4", self.iyy * 1e12)?;
        write!(f, "Ixy  = {:.0} mm^4", self.ixy * 1e12)
    }
}

/// Length and first moments of one panel group, used to cross-check the centroid
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GroupMoments {
    pub kind: PanelKind,
    pub length: f64,
    pub sx: f64,
    pub sy: f64,
}

/// Per-group length and first moments of length (`sum xm ds`, `sum ym ds`), in traversal order
pub fn group_moments(contour: &Contour) -> Vec<GroupMoments> {
    PanelKind::TRAVERSAL
        .iter()
        .map(|kind| {
            contour
                .panels()
                .iter()
                .filter(|p| p.kind == *kind)
                .fold(
                    GroupMoments {
                        kind: *kind,
                        length: 0.0,
                        sx: 0.0,
                        sy: 0.0,
                    },
                    |acc, p| GroupMoments {
                        length: acc.length + p.ds,
                        sx: acc.sx + p.xm * p.ds,
                        sy: acc.sy + p.ym * p.ds,
                        ..acc
                    },
                )
        })
        .filter(|g| g.length > 0.0)
        .collect()
}
