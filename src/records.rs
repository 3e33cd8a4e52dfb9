//! Row-oriented tables for every stage output, written and read with `csv`. Each table has a
//! header row; floats use the shortest representation that reads back to the same value.

use crate::airfoil::spar::ClippedSection;
use crate::airfoil::Airfoil;
use crate::contour::{Panel, PanelKind};
use crate::errors::{Result, SectionError};
use crate::section::SectionProperties;
use crate::shear::ShearFlowPanel;
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use log::debug;
use serde::Serialize;
use std::io::{Read, Write};

/// Columns a panel table must carry, matched case-insensitively
pub const PANEL_COLUMNS: [&str; 5] = ["panel", "xm", "ym", "ds", "theta"];

/// One point of a panel group with its position in the group and its arc length
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ContourPointRow {
    pub panel: PanelKind,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub s: f64,
}

impl ContourPointRow {
    pub fn from_section(section: &ClippedSection) -> Vec<ContourPointRow> {
        section
            .groups()
            .into_iter()
            .flat_map(|g| {
                g.points()
                    .iter()
                    .enumerate()
                    .map(move |(index, p)| ContourPointRow {
                        panel: g.kind(),
                        index,
                        x: p.x,
                        y: p.y,
                        s: p.s,
                    })
            })
            .collect()
    }
}

/// A point of the generated profile, before rotation and the spar cut
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProfilePointRow {
    pub x: f64,
    pub y: f64,
}

impl ProfilePointRow {
    /// Upper surface from the leading edge aft, then the lower surface forward
    pub fn from_airfoil(airfoil: &Airfoil) -> Vec<ProfilePointRow> {
        airfoil
            .to_outer_contour()
            .iter()
            .map(|p| ProfilePointRow { x: p.x, y: p.y })
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub panel: PanelKind,
    pub xm: f64,
    pub ym: f64,
    pub ds: f64,
    pub theta: f64,
}

impl From<&Panel> for PanelRow {
    fn from(p: &Panel) -> Self {
        PanelRow {
            panel: p.kind,
            xm: p.xm,
            ym: p.ym,
            ds: p.ds,
            theta: p.theta,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PropertiesRow {
    pub thickness: f64,
    pub area: f64,
    pub xbar: f64,
    pub ybar: f64,
    #[serde(rename = "Ixx")]
    pub ixx: f64,
    #[serde(rename = "Iyy")]
    pub iyy: f64,
    #[serde(rename = "Ixy")]
    pub ixy: f64,
}

impl From<&SectionProperties> for PropertiesRow {
    fn from(p: &SectionProperties) -> Self {
        PropertiesRow {
            thickness: p.thickness,
            area: p.area,
            xbar: p.xbar,
            ybar: p.ybar,
            ixx: p.ixx,
            iyy: p.iyy,
            ixy: p.ixy,
        }
    }
}

/// A panel of the shear flow solution, flattened for the table
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ShearFlowRow {
    pub panel: PanelKind,
    pub xm: f64,
    pub ym: f64,
    pub ds: f64,
    pub theta: f64,
    #[serde(rename = "Qx")]
    pub qx: f64,
    #[serde(rename = "Qy")]
    pub qy: f64,
    pub qs_b: f64,
    pub q_total: f64,
    pub tau: f64,
}

impl From<&ShearFlowPanel> for ShearFlowRow {
    fn from(p: &ShearFlowPanel) -> Self {
        ShearFlowRow {
            panel: p.panel.kind,
            xm: p.panel.xm,
            ym: p.panel.ym,
            ds: p.panel.ds,
            theta: p.panel.theta,
            qx: p.qx,
            qy: p.qy,
            qs_b: p.qs_b,
            q_total: p.q_total,
            tau: p.tau,
        }
    }
}

/// Writes one row per record, with the header taken from the first record's field names
pub fn write_table<W: Write, R: Serialize>(writer: W, rows: &[R]) -> Result<()> {
    let mut table = Writer::from_writer(writer);
    for row in rows.iter() {
        table.serialize(row)?;
    }
    table.flush()?;

    Ok(())
}

fn resolve_column(name: &str, headers: &StringRecord) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn field<'a>(record: &'a StringRecord, index: usize, column: &str, row: u64) -> Result<&'a str> {
    record.get(index).ok_or_else(|| {
        SectionError::MalformedInput(format!("row {}: missing field for column {}", row, column))
    })
}

fn parse_value(record: &StringRecord, index: usize, column: &str, row: u64) -> Result<f64> {
    let text = field(record, index, column, row)?;
    text.parse::<f64>().map_err(|_| {
        SectionError::MalformedInput(format!(
            "row {}: '{}' is not a number in column {}",
            row, text, column
        ))
    })
}

/// Reads a panel table by header name. Extra columns, such as a leading row index, are ignored.
/// Rows are grouped into the upper, lower, spar traversal, keeping their order within a group.
pub fn read_panels<R: Read>(reader: R) -> Result<Vec<Panel>> {
    let mut table = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = table
        .headers()
        .map_err(|e| SectionError::MalformedInput(format!("panel table header: {}", e)))?
        .clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SectionError::MalformedInput("empty panel table".to_string()));
    }

    let missing: Vec<String> = PANEL_COLUMNS
        .iter()
        .filter(|c| resolve_column(c, &headers).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SectionError::MissingColumns { columns: missing });
    }
    let [kind_i, xm_i, ym_i, ds_i, theta_i] =
        PANEL_COLUMNS.map(|c| resolve_column(c, &headers).unwrap_or(0));

    let mut panels = Vec::new();
    for (row_idx, result) in table.records().enumerate() {
        let row = row_idx as u64 + 1;
        let record = result.map_err(|e| {
            SectionError::MalformedInput(format!("csv parse error at row {}: {}", row, e))
        })?;

        panels.push(Panel {
            kind: field(&record, kind_i, "panel", row)?.parse::<PanelKind>()?,
            xm: parse_value(&record, xm_i, "xm", row)?,
            ym: parse_value(&record, ym_i, "ym", row)?,
            ds: parse_value(&record, ds_i, "ds", row)?,
            theta: parse_value(&record, theta_i, "theta", row)?,
        });
    }

    panels.sort_by_key(|p| PanelKind::TRAVERSAL.iter().position(|k| *k == p.kind));
    debug!("read {} panels", panels.len());

    Ok(panels)
}
