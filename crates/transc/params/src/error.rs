use crate::parameter::ParamKind;

/// Result alias for parameter operations.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors from reading, perturbing, or checkpointing parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("node <{node}> is missing attribute '{attr}'")]
    MissingAttribute { node: String, attr: String },
    #[error("node <{node}> attribute '{attr}' has unparsable value '{value}'")]
    InvalidAttribute {
        node: String,
        attr: String,
        value: String,
    },
    #[error("node <{node}> has no child <{child}>")]
    MissingChild { node: String, child: String },
    #[error("{operation} is not supported for parameters of type {kind}")]
    Unsupported {
        operation: &'static str,
        kind: ParamKind,
    },
    #[error("scrambled parameter '{name}' out of bounds: {value} not in [{low}, {high}]")]
    ScrambleOutOfBounds {
        name: String,
        value: f64,
        low: f64,
        high: f64,
    },
    #[error("checkpoint buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },
    #[error("invalid base symbol '{0}'")]
    InvalidBase(char),
    #[error("weight matrix has {rows} rows but node lists {entries} position entries")]
    PositionCountMismatch { rows: usize, entries: usize },
    #[error("malformed weight matrix row '{0}'")]
    MalformedRow(String),
    #[error("expected a {expected} value, got {found}")]
    KindMismatch { expected: ParamKind, found: ParamKind },
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
}
