use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AnalyticsSourceSetting, Config, ConfidenceLevelSetting, DataSettings, RiskSettings,
};

/// Loads the application configuration from the given TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `VARCUBE_*` environment variables on top,
/// deserializes the result into our strongly-typed `Config` struct, and
/// validates it.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path.as_ref()))
        .add_source(config::Environment::with_prefix("VARCUBE").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(
        analytics_sources = config.data.analytics.len(),
        confidence_levels = config.risk.confidence_levels.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Rejects configurations that would make the scenario grid meaningless.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.analytics.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one analytics source must be configured".to_string(),
        ));
    }
    let mut source_names = HashSet::new();
    for source in &config.data.analytics {
        if !source_names.insert(source.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate analytics source name '{}'",
                source.name
            )));
        }
    }

    if config.risk.confidence_levels.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one confidence level must be configured".to_string(),
        ));
    }
    let mut level_names = HashSet::new();
    for level in &config.risk.confidence_levels {
        if !level_names.insert(level.name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate confidence level name '{}'",
                level.name
            )));
        }
        if level.level <= Decimal::ZERO || level.level > Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "confidence level '{}' must be in (0, 1], got {}",
                level.name, level.level
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn sample_config() -> Config {
        Config {
            data: DataSettings {
                instruments: PathBuf::from("data/instruments.csv"),
                positions: PathBuf::from("data/positions.csv"),
                trading_desks: PathBuf::from("data/trading_desk.csv"),
                analytics: vec![AnalyticsSourceSetting {
                    name: "272-day".to_string(),
                    path: PathBuf::from("data/analytics_272.csv"),
                }],
            },
            risk: RiskSettings {
                confidence_levels: vec![ConfidenceLevelSetting {
                    name: "95%".to_string(),
                    level: dec!(0.95),
                }],
            },
        }
    }

    #[test]
    fn a_sane_config_validates() {
        assert!(validate(&sample_config()).is_ok());
    }

    #[test]
    fn confidence_levels_outside_unit_interval_are_rejected() {
        let mut config = sample_config();
        config.risk.confidence_levels[0].level = dec!(1.5);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));

        config.risk.confidence_levels[0].level = Decimal::ZERO;
        assert!(validate(&config).is_err());

        // The "Worst" scenario sits exactly at 1 and must be allowed.
        config.risk.confidence_levels[0].level = Decimal::ONE;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn duplicate_scenario_names_are_rejected() {
        let mut config = sample_config();
        config.data.analytics.push(config.data.analytics[0].clone());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn empty_axes_are_rejected() {
        let mut config = sample_config();
        config.risk.confidence_levels.clear();
        assert!(validate(&config).is_err());

        let mut config = sample_config();
        config.data.analytics.clear();
        assert!(validate(&config).is_err());
    }
}
