use transc_params::ParamError;

/// Result alias for promoter and competition operations.
pub type KineticsResult<T> = Result<T, KineticsError>;

/// Errors from building or persisting kinetic entities.
#[derive(Debug, thiserror::Error)]
pub enum KineticsError {
    #[error("could not find rate function with name '{0}'")]
    UnknownRateFunction(String),
    #[error("unrecognized proportionality type '{0}'")]
    UnknownProportionality(String),
    #[error("promoter '{promoter}' has no '{param}' parameter")]
    MissingParameter { promoter: String, param: String },
    #[error("invalid mode configuration: {0}")]
    InvalidMode(#[from] serde_json::Error),
    #[error(transparent)]
    Param(#[from] ParamError),
}
