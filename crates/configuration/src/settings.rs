use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSettings,
    pub risk: RiskSettings,
}

/// Locations of the four CSV stores.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Instrument reference data (comma-delimited).
    pub instruments: PathBuf,
    /// Position quantities by book (comma-delimited).
    pub positions: PathBuf,
    /// The book hierarchy table (comma-delimited).
    pub trading_desks: PathBuf,
    /// Analytics sources, one per pricing-model scenario. The first entry is
    /// the base scenario; the rest are overlays evaluated against the same
    /// positions and joins.
    pub analytics: Vec<AnalyticsSourceSetting>,
}

/// One analytics file: a named scenario binding for the PnL-vector data.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSourceSetting {
    pub name: String,
    /// Pipe-delimited CSV with semicolon-delimited PnL-vector cells.
    pub path: PathBuf,
}

/// Contains parameters for the VaR calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskSettings {
    /// The confidence-level scenarios to evaluate. A level of 1 reads the
    /// worst simulated outcome ("Worst").
    pub confidence_levels: Vec<ConfidenceLevelSetting>,
}

/// A named confidence level, e.g. "95%" at 0.95.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceLevelSetting {
    pub name: String,
    pub level: Decimal,
}
