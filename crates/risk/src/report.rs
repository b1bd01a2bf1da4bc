use core_types::HierarchyLevel;
use portfolio::NodePath;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cell of the evaluated scenario grid: every figure for one hierarchy
/// node under one (analytics source × confidence level) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarReportRow {
    /// Name of the analytics source (the data-axis scenario).
    pub source: String,
    /// Name of the confidence scenario, e.g. "95%" or "Worst".
    pub confidence: String,
    pub confidence_level: Decimal,
    pub path: NodePath,
    /// Hierarchy level of the node; `None` for the portfolio root.
    pub level: Option<HierarchyLevel>,
    pub quantity: Decimal,
    pub previous_day_pnl: Decimal,
    pub var: Decimal,
    /// `None` for the root, which has no parent to contribute to.
    pub marginal_var: Option<Decimal>,
}

/// The full output of a scenario-grid evaluation, flat and serializable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarReport {
    pub rows: Vec<VarReportRow>,
}

impl VarReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The distinct (source, confidence) scenario cells, in evaluation order.
    pub fn scenario_cells(&self) -> Vec<(String, String)> {
        let mut cells = Vec::new();
        for row in &self.rows {
            let cell = (row.source.clone(), row.confidence.clone());
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }

    /// The rows of one scenario cell, in hierarchy pre-order.
    pub fn rows_for<'a>(
        &'a self,
        source: &'a str,
        confidence: &'a str,
    ) -> impl Iterator<Item = &'a VarReportRow> {
        self.rows
            .iter()
            .filter(move |row| row.source == source && row.confidence == confidence)
    }
}
