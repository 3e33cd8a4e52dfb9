use crate::airfoil::generate::AirfoilGenerator;
use crate::airfoil::spar::{ClippedSection, SparWeb};
use crate::airfoil::Airfoil;
use crate::config::AnalysisConfig;
use crate::contour::Contour;
use crate::errors::Result;
use crate::section::{group_moments, GroupMoments, SectionProperties};
use crate::shear::{solve, ShearFlowSolution, ShearLoad};
use log::{debug, info};
use serde::Serialize;

/// Everything produced by one run, stage by stage
#[derive(Debug, Clone)]
pub struct Analysis {
    pub airfoil: Airfoil,
    pub section: ClippedSection,
    pub contour: Contour,
    pub properties: SectionProperties,
    pub shear: ShearFlowSolution,
}

impl Analysis {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::new(
            Some(self.section.web),
            &self.contour,
            &self.properties,
            &self.shear,
        )
    }
}

/// Structural stages only, for a contour that was built or imported elsewhere
#[derive(Debug, Clone)]
pub struct StructuralAnalysis {
    pub contour: Contour,
    pub properties: SectionProperties,
    pub shear: ShearFlowSolution,
}

impl StructuralAnalysis {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::new(
            None,
            &self.contour,
            &self.properties,
            &self.shear,
        )
    }
}

/// Scalar results of a run, suitable for writing out as JSON
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub spar: Option<SparWeb>,
    pub panels: usize,
    pub perimeter: f64,
    /// Length and first moments of each panel group
    pub groups: Vec<GroupMoments>,
    pub properties: SectionProperties,
    pub cell_area: f64,
    pub basic_torque: f64,
    pub external_torque: f64,
    pub q0: f64,
    pub max_abs_flow: f64,
    pub resultant_force: [f64; 2],
}

impl AnalysisSummary {
    fn new(
        spar: Option<SparWeb>,
        contour: &Contour,
        properties: &SectionProperties,
        shear: &ShearFlowSolution,
    ) -> Self {
        let (fx, fy) = shear.resultant_force();
        AnalysisSummary {
            spar,
            panels: contour.len(),
            perimeter: contour.perimeter(),
            groups: group_moments(contour),
            properties: *properties,
            cell_area: shear.cell_area,
            basic_torque: shear.basic_torque,
            external_torque: shear.external_torque,
            q0: shear.q0,
            max_abs_flow: shear.max_abs_flow(),
            resultant_force: [fx, fy],
        }
    }
}

/// Runs the whole pipeline: profile generation, rotation and spar cut, panels, section
/// properties and closed-cell shear flow.
pub fn run(config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;

    let airfoil = config.airfoil.generator()?.generate(config.airfoil.points);
    debug!("generated {} stations per surface", airfoil.len());

    let section = config.spar_cut().apply(&airfoil)?;
    let contour = Contour::from_groups(&section.groups())?;
    let structural = run_from_panels(contour, config.wall_thickness, &config.load)?;

    Ok(Analysis {
        airfoil,
        section,
        contour: structural.contour,
        properties: structural.properties,
        shear: structural.shear,
    })
}

pub fn run_from_panels(
    contour: Contour,
    thickness: f64,
    load: &ShearLoad,
) -> Result<StructuralAnalysis> {
    let properties = SectionProperties::from_contour(&contour, thickness)?;
    let shear = solve(&contour, &properties, load)?;
    info!(
        "{} panels, perimeter {:.6} m, q0 = {:.4} N/m",
        contour.len(),
        contour.perimeter(),
        shear.q0
    );

    Ok(StructuralAnalysis {
        contour,
        properties,
        shear,
    })
}
