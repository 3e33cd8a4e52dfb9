use thiserror::Error;

/// Every failure in the pipeline is fatal: it points at invalid geometry or configuration, so
/// nothing here is retried or recovered internally.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("query x = {x} is outside the curve domain [{min}, {max}]")]
    OutOfRangeQuery { x: f64, min: f64, max: f64 },

    #[error("degenerate section: {0}")]
    DegenerateSection(String),

    #[error("missing columns {columns:?}")]
    MissingColumns { columns: Vec<String> },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid parameter {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("not enough points")]
    NotEnoughPoints,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl SectionError {
    pub fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        SectionError::InvalidParameter {
            parameter,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SectionError>;
