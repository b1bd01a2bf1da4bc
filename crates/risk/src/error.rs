use portfolio::ModelError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Cannot compute a quantile of an empty PnL vector")]
    EmptyVector,

    #[error("Confidence level {0} is outside (0, 1]")]
    InvalidConfidence(Decimal),

    #[error("Duplicate confidence scenario name '{0}'")]
    DuplicateScenario(String),

    #[error("No confidence scenarios were configured")]
    NoScenarios,

    #[error(transparent)]
    Model(#[from] ModelError),
}
