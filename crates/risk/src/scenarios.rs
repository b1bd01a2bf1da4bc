use crate::error::RiskError;
use crate::report::{VarReport, VarReportRow};
use crate::var::VarCalculator;
use portfolio::{AnalyticsSource, PortfolioModel};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// A named confidence level, e.g. "95%" at 0.95 or "Worst" at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceScenario {
    pub name: String,
    pub level: Decimal,
}

impl ConfidenceScenario {
    pub fn new(name: impl Into<String>, level: Decimal) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// The cross-product of scenario axes: analytics sources × confidence levels.
///
/// The two axes are independent by construction. Vectors are rolled up once
/// per source (in the `VarCalculator`) and re-read at every confidence level;
/// the base joins and quantities are shared by everything. Evaluating
/// "150-day history at 98% confidence" is therefore just one more cell, not
/// a recomputation.
#[derive(Debug, Clone)]
pub struct ScenarioGrid {
    confidences: Vec<ConfidenceScenario>,
}

impl ScenarioGrid {
    pub fn new(confidences: Vec<ConfidenceScenario>) -> Result<Self, RiskError> {
        if confidences.is_empty() {
            return Err(RiskError::NoScenarios);
        }
        let mut names = HashSet::new();
        for scenario in &confidences {
            if !names.insert(scenario.name.as_str()) {
                return Err(RiskError::DuplicateScenario(scenario.name.clone()));
            }
            if scenario.level <= Decimal::ZERO || scenario.level > Decimal::ONE {
                return Err(RiskError::InvalidConfidence(scenario.level));
            }
        }
        Ok(Self { confidences })
    }

    pub fn confidences(&self) -> &[ConfidenceScenario] {
        &self.confidences
    }

    /// Evaluates every hierarchy node under every scenario cell.
    ///
    /// Nodes with no positions have no defined VaR and produce no rows; they
    /// never abort the rest of the grid.
    pub fn evaluate(
        &self,
        model: &PortfolioModel,
        sources: &[AnalyticsSource],
    ) -> Result<VarReport, RiskError> {
        let paths = model.tree().paths();
        let mut report = VarReport::default();

        for source in sources {
            tracing::info!(source = source.name(), "evaluating analytics scenario");
            let calculator = VarCalculator::new(model, source)?;

            for path in &paths {
                if !calculator.covers(path) {
                    continue;
                }
                let quantity = model.quantity(path)?;
                let previous_day_pnl = model.previous_day_pnl(path, source)?;

                for confidence in &self.confidences {
                    let var = calculator.var(path, confidence.level)?;
                    let marginal_var = calculator.marginal_var(path, confidence.level)?;
                    report.rows.push(VarReportRow {
                        source: source.name().to_string(),
                        confidence: confidence.name.clone(),
                        confidence_level: confidence.level,
                        path: path.clone(),
                        level: path.level(),
                        quantity,
                        previous_day_pnl,
                        var,
                        marginal_var,
                    });
                }
            }
        }

        tracing::info!(rows = report.len(), "scenario grid evaluated");
        Ok(report)
    }
}
