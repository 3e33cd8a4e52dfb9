use clap::Parser;
use log::info;
use shearflow_rs::analysis::{run, run_from_panels, AnalysisSummary};
use shearflow_rs::config::AnalysisConfig;
use shearflow_rs::contour::Contour;
use shearflow_rs::records::{
    read_panels, write_table, ContourPointRow, PanelRow, ProfilePointRow, PropertiesRow,
    ShearFlowRow,
};
use shearflow_rs::section::SectionProperties;
use shearflow_rs::shear::ShearFlowSolution;
use shearflow_rs::Result;
use std::fs::{create_dir_all, File};
use serde::Serialize;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Section properties and closed-cell shear flow of an airfoil wing box
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// JSON run configuration, the NACA 6412 reference case when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Solve an existing panel table instead of generating the geometry
    #[arg(short, long)]
    panels: Option<PathBuf>,

    /// Directory for the result tables
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Log level filter, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn write_rows<R: Serialize>(dir: &Path, name: &str, rows: &[R]) -> Result<()> {
    let path = dir.join(name);
    write_table(BufWriter::new(File::create(&path)?), rows)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn write_results(
    dir: &Path,
    contour: &Contour,
    properties: &SectionProperties,
    shear: &ShearFlowSolution,
    summary: &AnalysisSummary,
) -> Result<()> {
    let panels: Vec<PanelRow> = contour.panels().iter().map(PanelRow::from).collect();
    write_rows(dir, "panels.csv", &panels)?;
    write_rows(dir, "section_properties.csv", &[PropertiesRow::from(properties)])?;
    let flows: Vec<ShearFlowRow> = shear.panels.iter().map(ShearFlowRow::from).collect();
    write_rows(dir, "shear_flow.csv", &flows)?;

    let path = dir.join("summary.json");
    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, summary)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn execute(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    create_dir_all(&args.output)?;

    match &args.panels {
        Some(path) => {
            let panels = read_panels(BufReader::new(File::open(path)?))?;
            let contour = Contour::from_panels(panels)?;
            let result = run_from_panels(contour, config.wall_thickness, &config.load)?;
            write_results(
                &args.output,
                &result.contour,
                &result.properties,
                &result.shear,
                &result.summary(),
            )?;
            println!("{}", result.properties);
            println!("q0   = {:.3} N/m", result.shear.q0);
        }
        None => {
            let analysis = run(&config)?;
            let profile = ProfilePointRow::from_airfoil(&analysis.airfoil);
            write_rows(&args.output, "airfoil.csv", &profile)?;
            let points = ContourPointRow::from_section(&analysis.section);
            write_rows(&args.output, "points.csv", &points)?;
            write_results(
                &args.output,
                &analysis.contour,
                &analysis.properties,
                &analysis.shear,
                &analysis.summary(),
            )?;
            println!("{}", analysis.properties);
            println!("q0   = {:.3} N/m", analysis.shear.q0);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = &args.log_level {
        logger.parse_filters(level);
    }
    logger.init();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
